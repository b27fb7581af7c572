pub mod zip_archive;

pub use zip_archive::ZipExtractor;
