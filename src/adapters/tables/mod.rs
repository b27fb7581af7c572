//! Table adapters. CSV via the `csv` crate.

pub mod csv_table;

pub use csv_table::{CsvTable, records_to_csv};
