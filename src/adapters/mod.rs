//! Infrastructure adapters. Implement outbound ports.
//!
//! Files, HTTP, archives, SQLite, HTML, terminal. Map errors to DomainError.

pub mod archive;
pub mod geo;
pub mod http;
pub mod persistence;
pub mod tables;
pub mod ui;
pub mod wiki;
