pub mod geojson_file;

pub use geojson_file::GeoJsonFile;
