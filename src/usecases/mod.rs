//! Application use cases. Orchestrate domain logic via ports.

pub mod f1_service;
pub mod geo_service;
pub mod scrape_service;

pub use f1_service::{F1Service, TableLoad};
pub use geo_service::{DEFAULT_IDS_COLUMN, GeoService, GeoSources, check_report};
pub use scrape_service::ScrapeService;
