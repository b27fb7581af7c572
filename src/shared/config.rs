//! Application configuration. Property keys, paths, endpoints.

use crate::domain::PropertyKeys;
use serde::Deserialize;
use std::time::Duration;

/// Zipped CSV dump of the F1 results database.
pub const DEFAULT_F1_ZIP_URL: &str = "http://ergast.com/downloads/f1db_csv.zip";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    pub data_dir: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Geo Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// GeoJSON property holding the sovereign name. Read from SPORTPREP_SOVEREIGN_KEY.
    #[serde(default)]
    pub sovereign_key: Option<String>,

    /// GeoJSON property holding the map unit name. Read from SPORTPREP_MAP_UNIT_KEY.
    #[serde(default)]
    pub map_unit_key: Option<String>,

    /// GeoJSON property holding the boundary id. Read from SPORTPREP_BOUNDARY_ID_KEY.
    #[serde(default)]
    pub boundary_id_key: Option<String>,

    /// Team CSV column holding the geo label. Read from SPORTPREP_GEO_COLUMN.
    #[serde(default)]
    pub geo_column: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Fetch Configuration
    // ─────────────────────────────────────────────────────────────────────────
    #[serde(default)]
    pub f1_zip_url: Option<String>,

    /// SQLite file for the F1 tables. Defaults to {data_dir}/f1db.db.
    #[serde(default)]
    pub f1_db_path: Option<String>,

    #[serde(default)]
    pub scrape_output: Option<String>,

    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub http_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("SPORTPREP"));
        if let Ok(path) = std::env::var("SPORTPREP_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// GeoJSON property keys; unset keys fall back to the Natural Earth names.
    pub fn property_keys(&self) -> PropertyKeys {
        let d = PropertyKeys::default();
        PropertyKeys {
            sovereign: self.sovereign_key.clone().unwrap_or(d.sovereign),
            map_unit: self.map_unit_key.clone().unwrap_or(d.map_unit),
            boundary_id: self.boundary_id_key.clone().unwrap_or(d.boundary_id),
        }
    }

    pub fn geo_column_or_default(&self) -> String {
        self.geo_column.clone().unwrap_or_else(|| "geo_id".to_string())
    }

    pub fn f1_zip_url_or_default(&self) -> String {
        self.f1_zip_url
            .clone()
            .unwrap_or_else(|| DEFAULT_F1_ZIP_URL.to_string())
    }

    pub fn f1_db_path_or_default(&self) -> String {
        self.f1_db_path
            .clone()
            .unwrap_or_else(|| format!("{}/f1db.db", self.data_dir_or_default()))
    }

    pub fn scrape_output_or_default(&self) -> String {
        self.scrape_output
            .clone()
            .unwrap_or_else(|| "first_football_matches.csv".to_string())
    }

    pub fn user_agent_or_default(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("sportsprep/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Defaults to 30 seconds.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.unwrap_or(30))
    }
}
