//! JSON adapters for extraction configs and color legends.

use std::fs;
use std::path::Path;

use shiftsheet_core::{ColorLegend, ColorLegendEntry, ExtractionConfig};

use crate::SheetIoError;

/// Parse an [`ExtractionConfig`] from a JSON document.
pub fn parse_config(json: &str) -> Result<ExtractionConfig, SheetIoError> {
    Ok(serde_json::from_str(json)?)
}

/// Load an [`ExtractionConfig`] from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractionConfig, SheetIoError> {
    parse_config(&fs::read_to_string(path)?)
}

/// Parse a [`ColorLegend`] from a JSON array of legend entries.
pub fn parse_legend(json: &str) -> Result<ColorLegend, SheetIoError> {
    let entries: Vec<ColorLegendEntry> = serde_json::from_str(json)?;
    Ok(ColorLegend::new(entries))
}

/// Load a [`ColorLegend`] from a JSON file.
pub fn load_legend(path: &Path) -> Result<ColorLegend, SheetIoError> {
    parse_legend(&fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shiftsheet_core::{Role, StyleKey};
    use std::io::Write;

    const CONFIG_JSON: &str = r#"{
        "role": "OPERATOR",
        "dateRow": 8,
        "nameColumn": 1,
        "firstNameRow": 9,
        "lastNameRow": 11,
        "firstDateColumn": 2,
        "lastDateColumn": 31,
        "colorDetection": true,
        "skipValues": ["co"]
    }"#;

    // The color code contains `"#`, so the literal needs double-hash
    // delimiters.
    const LEGEND_JSON: &str = r##"[
        {
            "colorCode": "#FFCC00",
            "colorName": "Yellow",
            "shiftName": "Morning",
            "startTime": "06:00",
            "endTime": "14:00"
        }
    ]"##;

    #[test]
    fn config_parses_with_defaults() {
        let config = parse_config(CONFIG_JSON).unwrap();
        assert_eq!(config.role, Role::Operator);
        assert_eq!(config.date_row, 8);
        assert_eq!(config.skip_values, vec!["co".to_string()]);
        assert!(config.color_detection);
        assert!(!config.dynamic_columns);
    }

    #[test]
    fn malformed_config_is_a_json_error() {
        assert!(matches!(
            parse_config("{\"role\": 12}"),
            Err(SheetIoError::Json(_))
        ));
    }

    #[test]
    fn legend_parses_and_indexes_by_color() {
        let legend = parse_legend(LEGEND_JSON).unwrap();
        let key = StyleKey::normalize("FFFFCC00").unwrap();
        let entry = legend.entry_for_style(&key).unwrap();
        assert_eq!(entry.shift_name, "Morning");
    }

    #[test]
    fn files_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legend.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(LEGEND_JSON.as_bytes()).unwrap();

        let legend = load_legend(&path).unwrap();
        assert_eq!(legend.entries().len(), 1);

        assert!(matches!(
            load_legend(&dir.path().join("missing.json")),
            Err(SheetIoError::Io(_))
        ));
    }
}
