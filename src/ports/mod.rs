//! Port traits. API boundaries for the hexagon.
//!
//! - Outbound: Called by application into infrastructure
//! - Chooser: Called by the scraper when a team cell is ambiguous

pub mod chooser;
pub mod outbound;

pub use chooser::LinkChooser;
pub use outbound::{ArchivePort, GeoJsonPort, HttpPort, RecordStorePort, TablePort};
