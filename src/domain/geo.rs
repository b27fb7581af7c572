//! Geo reconciliation: map team geo labels to boundary ids.
//!
//! Labels are expanded through the alias table, then each name is looked up
//! first among sovereign records, then among map units. When a label's own
//! expansion asks for a map unit, the parent sovereign's boundary is dropped
//! from that label's result so nothing is shaded at two granularities.

use crate::domain::aliases::AliasTable;
use crate::domain::{BoundaryRecord, DomainError, Entity};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

/// How a single expanded name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Sovereign {
        name: String,
        boundary_ids: Vec<String>,
    },
    MapUnit {
        parent_sovereign: String,
        boundary_ids: Vec<String>,
    },
    Unresolved {
        name: String,
    },
}

/// Surviving boundary ids for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationResult {
    pub geo_label: String,
    pub boundary_ids: BTreeSet<String>,
    pub unresolved: Vec<String>,
}

impl ReconciliationResult {
    /// Comma-joined ids, as written to the annotated table.
    pub fn joined_ids(&self) -> String {
        self.boundary_ids
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Batch-level view: which sovereigns need their map units, which names failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoCheck {
    pub split_sovereigns: BTreeSet<String>,
    pub unresolved: BTreeSet<String>,
}

impl GeoCheck {
    /// Err(`UnresolvedLabel`) listing every unresolved name, if any.
    pub fn ensure_resolved(&self) -> Result<(), DomainError> {
        if self.unresolved.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = self.unresolved.iter().map(String::as_str).collect();
        Err(DomainError::UnresolvedLabel(names.join(", ")))
    }
}

/// Lookup tables over both boundary datasets. Built once, read-only afterwards.
pub struct GeoReconciler<'a> {
    aliases: &'a AliasTable,
    /// sovereign name -> boundary ids, in input order
    sovereigns: HashMap<String, Vec<String>>,
    /// map unit name -> (parent sovereign, boundary ids)
    map_units: HashMap<String, (String, Vec<String>)>,
}

impl<'a> GeoReconciler<'a> {
    pub fn new(
        sovereign_records: &[BoundaryRecord],
        map_unit_records: &[BoundaryRecord],
        aliases: &'a AliasTable,
    ) -> Self {
        let mut sovereigns: HashMap<String, Vec<String>> = HashMap::new();
        for r in sovereign_records {
            sovereigns
                .entry(r.sovereign_name.clone())
                .or_default()
                .push(r.boundary_id.clone());
        }
        let mut map_units: HashMap<String, (String, Vec<String>)> = HashMap::new();
        for r in map_unit_records {
            map_units
                .entry(r.map_unit_name.clone())
                .or_insert_with(|| (r.sovereign_name.clone(), Vec::new()))
                .1
                .push(r.boundary_id.clone());
        }
        Self {
            aliases,
            sovereigns,
            map_units,
        }
    }

    pub fn expand_label<'l>(&'l self, label: &'l str) -> Vec<&'l str> {
        self.aliases.expand(label)
    }

    pub fn resolve_name(&self, name: &str) -> Resolution {
        if let Some(ids) = self.sovereigns.get(name) {
            return Resolution::Sovereign {
                name: name.to_string(),
                boundary_ids: ids.clone(),
            };
        }
        if let Some((parent, ids)) = self.map_units.get(name) {
            return Resolution::MapUnit {
                parent_sovereign: parent.clone(),
                boundary_ids: ids.clone(),
            };
        }
        warn!(name, "no geounit or sovereignty found");
        Resolution::Unresolved {
            name: name.to_string(),
        }
    }

    pub fn reconcile(&self, entity: &Entity) -> ReconciliationResult {
        let mut sovereign_hits: Vec<(String, Vec<String>)> = Vec::new();
        let mut covered: HashSet<String> = HashSet::new();
        let mut boundary_ids = BTreeSet::new();
        let mut unresolved = Vec::new();

        for name in self.expand_label(&entity.geo_label) {
            match self.resolve_name(name) {
                Resolution::Sovereign {
                    name,
                    boundary_ids: ids,
                } => sovereign_hits.push((name, ids)),
                Resolution::MapUnit {
                    parent_sovereign,
                    boundary_ids: ids,
                } => {
                    covered.insert(parent_sovereign);
                    boundary_ids.extend(ids);
                }
                Resolution::Unresolved { name } => unresolved.push(name),
            }
        }

        for (name, ids) in sovereign_hits {
            if covered.contains(&name) {
                debug!(
                    label = %entity.geo_label,
                    sovereign = %name,
                    "sovereign boundary replaced by its map units"
                );
                continue;
            }
            boundary_ids.extend(ids);
        }

        ReconciliationResult {
            geo_label: entity.geo_label.clone(),
            boundary_ids,
            unresolved,
        }
    }

    /// One result per entity, in input order.
    pub fn reconcile_all(&self, entities: &[Entity]) -> Vec<ReconciliationResult> {
        entities.iter().map(|e| self.reconcile(e)).collect()
    }

    /// Over the distinct labels: sovereigns whose map units are needed, and
    /// names found in neither dataset.
    pub fn check<'l, I>(&self, labels: I) -> GeoCheck
    where
        I: IntoIterator<Item = &'l str>,
    {
        let distinct: BTreeSet<&str> = labels.into_iter().collect();
        let expanded: BTreeSet<&str> = distinct
            .iter()
            .flat_map(|label| self.expand_label(*label))
            .collect();

        let mut check = GeoCheck::default();
        for name in expanded {
            match self.resolve_name(name) {
                Resolution::Sovereign { .. } => {}
                Resolution::MapUnit {
                    parent_sovereign, ..
                } => {
                    check.split_sovereigns.insert(parent_sovereign);
                }
                Resolution::Unresolved { name } => {
                    check.unresolved.insert(name);
                }
            }
        }
        check
    }
}
