//! Extraction configuration
//!
//! The validated per-role configuration describing where the date header,
//! name band and shift grid live in an uploaded sheet. Created and edited by
//! an external admin workflow; always passed to extraction as an explicit,
//! immutable parameter — never read from ambient state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Role;

/// Per-role extraction configuration.
///
/// Coordinates are zero-based; row/column bounds are inclusive. Field names
/// serialize camelCase to match the external configuration store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionConfig {
    pub role: Role,
    /// Row containing calendar day numbers
    pub date_row: usize,
    /// Column holding person names
    pub name_column: usize,
    /// First row of the name band (inclusive)
    pub first_name_row: usize,
    /// Last row of the name band (inclusive)
    pub last_name_row: usize,
    /// First column of the date band (inclusive)
    pub first_date_column: usize,
    /// Last column of the date band (inclusive)
    pub last_date_column: usize,
    /// Re-derive the date band width from populated cells each month
    #[serde(default)]
    pub dynamic_columns: bool,
    /// Tokens whose cells are excluded from extraction entirely
    #[serde(default)]
    pub skip_values: Vec<String>,
    /// Coordinator/supervisory designations used to flag name rows
    #[serde(default)]
    pub valid_patterns: Vec<String>,
    /// Resolve shifts from cell fill color (true) or cell text (false)
    #[serde(default)]
    pub color_detection: bool,
    /// Shift applied when color detection finds no legend match
    #[serde(default)]
    pub default_shift: Option<String>,
    /// Treat adjacent populated name rows as first-name/last-name pairs
    #[serde(default)]
    pub split_name_rows: bool,
}

impl ExtractionConfig {
    /// Reject degenerate or inverted coordinate ranges up front, before any
    /// cell is scanned.
    ///
    /// Note the name band check is strict (`first < last`): a single-row band
    /// is rejected, matching the source system's validation rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_name_row >= self.last_name_row {
            return Err(ConfigError::DegenerateNameBand {
                first: self.first_name_row,
                last: self.last_name_row,
            });
        }
        if self.first_date_column >= self.last_date_column {
            return Err(ConfigError::DegenerateDateBand {
                first: self.first_date_column,
                last: self.last_date_column,
            });
        }
        Ok(())
    }

    /// Whether a cell's text matches a configured skip value
    /// (case-insensitive, trimmed).
    pub fn is_skip_value(&self, text: &str) -> bool {
        let needle = text.trim();
        if needle.is_empty() {
            return false;
        }
        self.skip_values
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(needle))
    }

    /// Whether a name-band row matches a coordinator/supervisory pattern
    /// (case-insensitive substring).
    pub fn matches_coordinator_pattern(&self, text: &str) -> bool {
        if self.valid_patterns.is_empty() {
            return false;
        }
        let haystack = text.to_lowercase();
        self.valid_patterns
            .iter()
            .any(|p| !p.trim().is_empty() && haystack.contains(&p.trim().to_lowercase()))
    }
}

/// Fatal configuration error, detected before extraction begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("first name row {first} must be less than last name row {last}")]
    DegenerateNameBand { first: usize, last: usize },

    #[error("first date column {first} must be less than last date column {last}")]
    DegenerateDateBand { first: usize, last: usize },

    #[error("invalid schedule month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
}
