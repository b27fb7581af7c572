//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP or database types here; adapters map into these.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One boundary geometry, described by its properties only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryRecord {
    pub sovereign_name: String,
    /// Equal to `sovereign_name` for the sovereign's own mainland unit.
    pub map_unit_name: String,
    pub boundary_id: String,
}

/// Property names used to read [`BoundaryRecord`]s out of GeoJSON features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyKeys {
    pub sovereign: String,
    pub map_unit: String,
    pub boundary_id: String,
}

impl Default for PropertyKeys {
    fn default() -> Self {
        Self {
            sovereign: "SOVEREIGNT".to_string(),
            map_unit: "GEOUNIT".to_string(),
            boundary_id: "GU_A3".to_string(),
        }
    }
}

/// GeoJSON feature. Geometry and unknown members are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Feature {
    /// String-valued property, if present.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)?.as_str()
    }

    /// Read the feature as a boundary record. `None` when the sovereign name or
    /// boundary id is missing; a missing map-unit name falls back to the sovereign.
    pub fn to_record(&self, keys: &PropertyKeys) -> Option<BoundaryRecord> {
        let sovereign_name = self.property(&keys.sovereign)?.to_string();
        let boundary_id = self.property(&keys.boundary_id)?.to_string();
        let map_unit_name = self
            .property(&keys.map_unit)
            .map(String::from)
            .unwrap_or_else(|| sovereign_name.clone());
        Some(BoundaryRecord {
            sovereign_name,
            map_unit_name,
            boundary_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
            extra: Map::new(),
        }
    }

    /// Boundary records of every feature carrying the required properties.
    pub fn records(&self, keys: &PropertyKeys) -> Vec<BoundaryRecord> {
        self.features
            .iter()
            .filter_map(|f| {
                let record = f.to_record(keys);
                if record.is_none() {
                    tracing::debug!(
                        sovereign_key = %keys.sovereign,
                        id_key = %keys.boundary_id,
                        "feature without sovereign name or boundary id; skipped"
                    );
                }
                record
            })
            .collect()
    }
}

/// A CSV table held as text. Column order and row order are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of a column, in row order. Short rows yield an empty string.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, super::DomainError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| super::DomainError::MissingColumn(name.to_string()))?;
        Ok(self
            .rows
            .iter()
            .map(|r| r.get(idx).map(String::as_str).unwrap_or(""))
            .collect())
    }

    /// Append a column; `values` must hold one value per row.
    pub fn push_column(&mut self, name: &str, values: Vec<String>) {
        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }
}

/// A named thing (a team) with the place label it plays for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub geo_label: String,
}

impl Entity {
    pub fn new(geo_label: impl Into<String>) -> Self {
        Self {
            geo_label: geo_label.into(),
        }
    }
}

/// A first-international match as read from a wiki section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedMatch {
    pub date_text: String,
    pub ko_year: i32,
    pub match_type: String,
    pub teams: [String; 2],
    pub scores: [u32; 2],
    pub venue: String,
    /// Associations debuting in this match; `None` for defunct associations with no successor.
    pub debuts: Vec<Option<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl MatchOutcome {
    pub fn from_scores(own: u32, opponent: u32) -> Self {
        match own.cmp(&opponent) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

/// One row of the first-internationals CSV, from the debuting team's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebutRecord {
    pub team_name: String,
    pub oppname: String,
    pub outcome: MatchOutcome,
    pub score: String,
    pub venue: String,
    pub ko_year: i32,
    pub ko_date: String,
    /// Competition, as printed under the date ("Friendly", ...).
    pub match_type: String,
}

/// A hyperlink candidate inside a team cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamLink {
    pub text: String,
    pub title: Option<String>,
}
