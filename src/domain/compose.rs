//! Compound boundary map: sovereign shapes, swapped for map units where teams need them.

use crate::domain::{Feature, FeatureCollection, PropertyKeys};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};

/// Build the compound collection.
///
/// Sovereign features are kept unless their sovereign is in `split`; map-unit
/// features are kept only if their sovereign is in `split`. Every kept feature
/// gets `id = boundary id` and ids are unique (first occurrence wins). With
/// `keep_only`, features whose id is not listed are dropped as well.
pub fn compose_boundaries(
    sovereign_geo: &FeatureCollection,
    map_unit_geo: &FeatureCollection,
    keys: &PropertyKeys,
    split: &BTreeSet<String>,
    keep_only: Option<&BTreeSet<String>>,
) -> FeatureCollection {
    let mut seen: HashSet<String> = HashSet::new();
    let mut features = Vec::new();

    let sovereign_side = sovereign_geo
        .features
        .iter()
        .filter(|f| is_split(f, keys, split) == Some(false));
    let map_unit_side = map_unit_geo
        .features
        .iter()
        .filter(|f| is_split(f, keys, split) == Some(true));

    for feature in sovereign_side.chain(map_unit_side) {
        let Some(id) = feature.property(&keys.boundary_id) else {
            continue;
        };
        if keep_only.is_some_and(|keep| !keep.contains(id)) {
            continue;
        }
        if !seen.insert(id.to_string()) {
            continue;
        }
        let mut tagged = feature.clone();
        tagged.id = Some(Value::String(id.to_string()));
        features.push(tagged);
    }

    let mut out = FeatureCollection::new(features);
    out.extra = sovereign_geo.extra.clone();
    out
}

fn is_split(feature: &Feature, keys: &PropertyKeys, split: &BTreeSet<String>) -> Option<bool> {
    feature
        .property(&keys.sovereign)
        .map(|sovereign| split.contains(sovereign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(sovereign: &str, unit: &str, id: &str) -> Feature {
        serde_json::from_value(json!({
            "type": "Feature",
            "properties": { "SOVEREIGNT": sovereign, "GEOUNIT": unit, "GU_A3": id },
            "geometry": null
        }))
        .unwrap()
    }

    fn ids(fc: &FeatureCollection) -> Vec<String> {
        fc.features
            .iter()
            .map(|f| f.id.as_ref().and_then(Value::as_str).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_split_sovereign_swapped_for_map_units() {
        let sov = FeatureCollection::new(vec![
            feature("United Kingdom", "United Kingdom", "GBR"),
            feature("France", "France", "FRA"),
        ]);
        let mu = FeatureCollection::new(vec![
            feature("United Kingdom", "England", "ENG"),
            feature("United Kingdom", "Scotland", "SCT"),
            feature("France", "France", "FXX"),
        ]);
        let split = BTreeSet::from(["United Kingdom".to_string()]);
        let out = compose_boundaries(&sov, &mu, &PropertyKeys::default(), &split, None);
        assert_eq!(ids(&out), vec!["FRA", "ENG", "SCT"]);
        assert_eq!(out.kind, "FeatureCollection");
    }

    #[test]
    fn test_duplicate_ids_and_keep_only() {
        let sov = FeatureCollection::new(vec![
            feature("France", "France", "FRA"),
            feature("France", "France", "FRA"),
            feature("Spain", "Spain", "ESP"),
        ]);
        let mu = FeatureCollection::new(vec![]);
        let keys = PropertyKeys::default();
        let out = compose_boundaries(&sov, &mu, &keys, &BTreeSet::new(), None);
        assert_eq!(ids(&out), vec!["FRA", "ESP"]);

        let keep = BTreeSet::from(["ESP".to_string()]);
        let out = compose_boundaries(&sov, &mu, &keys, &BTreeSet::new(), Some(&keep));
        assert_eq!(ids(&out), vec!["ESP"]);
    }
}
