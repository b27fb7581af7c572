//! Geo tooling: check labels, build the compound map, annotate the team table.
//!
//! All three modes load the boundary GeoJSON(s) and the team CSV through
//! ports, then hand the records to `GeoReconciler`.

use crate::domain::aliases::AliasTable;
use crate::domain::compose::compose_boundaries;
use crate::domain::{
    DomainError, Entity, FeatureCollection, GeoCheck, GeoReconciler, PropertyKeys,
    ReconciliationResult, Table,
};
use crate::ports::{GeoJsonPort, TablePort};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Column appended by `add_geo_ids` unless the caller names another.
pub const DEFAULT_IDS_COLUMN: &str = "geounits";

/// Input files shared by `check_geo` and `make_geo`.
#[derive(Debug, Clone, Copy)]
pub struct GeoSources<'p> {
    pub sovereign_geojson: &'p Path,
    pub map_unit_geojson: &'p Path,
    pub team_csv: &'p Path,
    /// Team CSV column holding the geo label.
    pub geo_column: &'p str,
}

pub struct GeoService {
    geojson: Arc<dyn GeoJsonPort>,
    tables: Arc<dyn TablePort>,
    keys: PropertyKeys,
    aliases: &'static AliasTable,
}

impl GeoService {
    pub fn new(geojson: Arc<dyn GeoJsonPort>, tables: Arc<dyn TablePort>, keys: PropertyKeys) -> Self {
        Self {
            geojson,
            tables,
            keys,
            aliases: AliasTable::builtin(),
        }
    }

    /// Report unresolved names and the sovereigns that need their map units.
    ///
    /// With `strict`, any unresolved name is returned as `UnresolvedLabel`
    /// after the report has been printed.
    pub async fn check_geo(&self, src: GeoSources<'_>, strict: bool) -> Result<GeoCheck, DomainError> {
        let (sovereign_geo, map_unit_geo, teams) = self.load(src).await?;
        let labels = team_labels(&teams, src.geo_column)?;

        let sovereigns = sovereign_geo.records(&self.keys);
        let map_units = map_unit_geo.records(&self.keys);
        let reconciler = GeoReconciler::new(&sovereigns, &map_units, self.aliases);
        let check = reconciler.check(labels.iter().copied());

        for name in &check.unresolved {
            warn!(name = %name, "unresolved geo name");
        }
        info!(
            labels = labels.len(),
            split = check.split_sovereigns.len(),
            unresolved = check.unresolved.len(),
            sovereigns = ?check.split_sovereigns,
            "geo check complete"
        );
        eprint!("{}", check_report(&check));

        if strict {
            check.ensure_resolved()?;
        }
        Ok(check)
    }

    /// Write the compound boundary map. Returns the number of features written.
    pub async fn make_geo(
        &self,
        src: GeoSources<'_>,
        out: &Path,
        assigned_only: bool,
    ) -> Result<usize, DomainError> {
        let (sovereign_geo, map_unit_geo, teams) = self.load(src).await?;
        let labels = team_labels(&teams, src.geo_column)?;

        let sovereigns = sovereign_geo.records(&self.keys);
        let map_units = map_unit_geo.records(&self.keys);
        let reconciler = GeoReconciler::new(&sovereigns, &map_units, self.aliases);
        let check = reconciler.check(labels.iter().copied());

        let assigned: Option<BTreeSet<String>> = if assigned_only {
            let entities: Vec<Entity> = labels.iter().map(|l| Entity::new(*l)).collect();
            Some(
                reconciler
                    .reconcile_all(&entities)
                    .into_iter()
                    .flat_map(|r| r.boundary_ids)
                    .collect(),
            )
        } else {
            None
        };

        let composed = compose_boundaries(
            &sovereign_geo,
            &map_unit_geo,
            &self.keys,
            &check.split_sovereigns,
            assigned.as_ref(),
        );
        self.geojson.write_collection(out, &composed).await?;
        info!(
            path = %out.display(),
            features = composed.features.len(),
            split = check.split_sovereigns.len(),
            assigned_only,
            "compound map written"
        );
        Ok(composed.features.len())
    }

    /// Append the comma-joined boundary ids of every row as `column` and write
    /// the table to `out`. Without `map_unit_geojson`, `geojson` is used as
    /// both the sovereign and the map-unit table.
    pub async fn add_geo_ids(
        &self,
        geojson: &Path,
        map_unit_geojson: Option<&Path>,
        team_csv: &Path,
        geo_column: &str,
        out: &Path,
        column: &str,
    ) -> Result<Vec<ReconciliationResult>, DomainError> {
        let sovereign_geo = self.geojson.read_collection(geojson).await?;
        let map_unit_geo = match map_unit_geojson {
            Some(p) => Some(self.geojson.read_collection(p).await?),
            None => None,
        };
        let mut teams = self.tables.read_table(team_csv).await?;

        let sovereigns = sovereign_geo.records(&self.keys);
        let map_units = match &map_unit_geo {
            Some(fc) => fc.records(&self.keys),
            None => sovereigns.clone(),
        };
        let reconciler = GeoReconciler::new(&sovereigns, &map_units, self.aliases);

        let entities: Vec<Entity> = teams
            .column(geo_column)?
            .into_iter()
            .map(Entity::new)
            .collect();
        let results: Vec<ReconciliationResult> = entities
            .iter()
            .map(|e| {
                if e.geo_label.is_empty() {
                    ReconciliationResult {
                        geo_label: String::new(),
                        boundary_ids: BTreeSet::new(),
                        unresolved: Vec::new(),
                    }
                } else {
                    reconciler.reconcile(e)
                }
            })
            .collect();

        teams.push_column(column, results.iter().map(|r| r.joined_ids()).collect());
        self.tables.write_table(out, &teams).await?;

        let unresolved: usize = results.iter().map(|r| r.unresolved.len()).sum();
        info!(
            path = %out.display(),
            rows = results.len(),
            column,
            unresolved,
            "geo ids added"
        );
        Ok(results)
    }

    async fn load(
        &self,
        src: GeoSources<'_>,
    ) -> Result<(FeatureCollection, FeatureCollection, Table), DomainError> {
        tokio::try_join!(
            self.geojson.read_collection(src.sovereign_geojson),
            self.geojson.read_collection(src.map_unit_geojson),
            self.tables.read_table(src.team_csv),
        )
    }
}

/// Non-empty labels of the geo column.
fn team_labels<'t>(teams: &'t Table, geo_column: &str) -> Result<Vec<&'t str>, DomainError> {
    Ok(teams
        .column(geo_column)?
        .into_iter()
        .filter(|l| !l.is_empty())
        .collect())
}

/// Human-readable summary of a check, one name per line.
pub fn check_report(check: &GeoCheck) -> String {
    let mut out = String::new();
    if check.unresolved.is_empty() {
        out.push_str("All geo names resolved.\n");
    } else {
        let _ = writeln!(out, "Unresolved geo names ({}):", check.unresolved.len());
        for name in &check.unresolved {
            let _ = writeln!(out, "  {}", name);
        }
    }
    if !check.split_sovereigns.is_empty() {
        let _ = writeln!(
            out,
            "Sovereigns drawn by map unit ({}):",
            check.split_sovereigns.len()
        );
        for name in &check.split_sovereigns {
            let _ = writeln!(out, "  {}", name);
        }
    }
    out
}
