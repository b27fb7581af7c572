//! F1 results dump: table catalogue and cell typing.

use regex::Regex;
use std::sync::LazyLock;

/// A dump table and the columns (as named in the CSV) that identify a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub key_columns: &'static [&'static str],
}

impl TableSpec {
    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.name)
    }
}

/// Load order: referenced tables before the tables referencing them.
pub const F1_TABLES: &[TableSpec] = &[
    TableSpec { name: "status", key_columns: &["statusId"] },
    TableSpec { name: "seasons", key_columns: &["year"] },
    TableSpec { name: "circuits", key_columns: &["circuitId"] },
    TableSpec { name: "drivers", key_columns: &["driverId"] },
    TableSpec { name: "constructors", key_columns: &["constructorId"] },
    TableSpec { name: "races", key_columns: &["raceId"] },
    TableSpec { name: "constructor_results", key_columns: &["constructorResultsId"] },
    TableSpec { name: "constructor_standings", key_columns: &["constructorStandingsId"] },
    TableSpec { name: "driver_standings", key_columns: &["driverStandingsId"] },
    TableSpec { name: "lap_times", key_columns: &["raceId", "driverId", "lap"] },
    TableSpec { name: "pit_stops", key_columns: &["raceId", "driverId", "stop"] },
    TableSpec { name: "qualifying", key_columns: &["qualifyId"] },
    TableSpec { name: "results", key_columns: &["resultId"] },
];

/// MySQL-style NULL marker used in the dump.
pub const NULL_MARKER: &str = "\\N";

static CAMEL_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(.)([A-Z][a-z]+)").expect("camel word regex"));
static CAMEL_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("([a-z0-9])([A-Z])").expect("camel tail regex"));

/// `raceId` -> `race_id`, `fastestLapTime` -> `fastest_lap_time`.
pub fn camel_to_snake(name: &str) -> String {
    let s = CAMEL_WORD.replace_all(name, "${1}_${2}");
    CAMEL_TAIL.replace_all(&s, "${1}_${2}").to_lowercase()
}

/// A typed CSV cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl CellValue {
    pub fn parse(raw: &str) -> Self {
        if raw == NULL_MARKER {
            return CellValue::Null;
        }
        if let Ok(i) = raw.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
            if let Ok(f) = raw.parse::<f64>() {
                return CellValue::Real(f);
            }
        }
        CellValue::Text(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("raceId"), "race_id");
        assert_eq!(camel_to_snake("fastestLapTime"), "fastest_lap_time");
        assert_eq!(camel_to_snake("constructorStandingsId"), "constructor_standings_id");
        assert_eq!(camel_to_snake("positionText"), "position_text");
        assert_eq!(camel_to_snake("year"), "year");
        assert_eq!(camel_to_snake("q1"), "q1");
    }

    #[test]
    fn test_cell_value_parse() {
        assert_eq!(CellValue::parse("\\N"), CellValue::Null);
        assert_eq!(CellValue::parse("42"), CellValue::Integer(42));
        assert_eq!(CellValue::parse("-3"), CellValue::Integer(-3));
        assert_eq!(CellValue::parse("218.3"), CellValue::Real(218.3));
        assert_eq!(CellValue::parse("1:27.452"), CellValue::Text("1:27.452".to_string()));
        assert_eq!(CellValue::parse("2009-03-29"), CellValue::Text("2009-03-29".to_string()));
        assert_eq!(CellValue::parse("inf"), CellValue::Text("inf".to_string()));
        assert_eq!(CellValue::parse(""), CellValue::Text(String::new()));
    }

    #[test]
    fn test_catalogue_order() {
        let names: Vec<&str> = F1_TABLES.iter().map(|t| t.name).collect();
        assert_eq!(names.first(), Some(&"status"));
        assert_eq!(names.last(), Some(&"results"));
        assert_eq!(names.len(), 13);
        assert_eq!(F1_TABLES[9].csv_file_name(), "lap_times.csv");
    }
}
