//! Wiki page parsing with the `scraper` crate.

pub mod first_matches;

pub use first_matches::{FirstMatchParser, HeadingLevel, WikiPage, default_pages};
