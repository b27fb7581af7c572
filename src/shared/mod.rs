//! Cross-cutting concerns shared by main and the use cases.

pub mod config;
