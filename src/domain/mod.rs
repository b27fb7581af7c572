//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod aliases;
pub mod compose;
pub mod entities;
pub mod errors;
pub mod f1;
pub mod geo;
pub mod matches;

pub use entities::{
    BoundaryRecord, DebutRecord, Entity, Feature, FeatureCollection, MatchOutcome, PropertyKeys,
    ScrapedMatch, Table, TeamLink,
};
pub use errors::DomainError;
pub use geo::{GeoCheck, GeoReconciler, ReconciliationResult, Resolution};
