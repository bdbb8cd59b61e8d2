//! Color-to-shift classification
//!
//! Maps a cell's fill style (or its text, when color detection is off) to a
//! shift name using the externally supplied legend. Deterministic: color
//! codes are unique in the legend by external invariant, so ties cannot
//! occur.

use shiftsheet_core::{CellValue, ColorLegend, ExtractionConfig, StyleKey};

/// Resolve a cell to a shift name plus any per-cell warnings.
///
/// With color detection on: an absent fill applies the default shift when
/// one is configured, otherwise the cell stays unassigned with a warning;
/// an unknown fill warns naming the unmatched color, then applies the
/// default. With color detection off, only the cell text is consulted,
/// matched case-insensitively against legend shift names.
pub fn classify_shift(
    style_key: Option<&StyleKey>,
    value: &CellValue,
    legend: &ColorLegend,
    config: &ExtractionConfig,
) -> (Option<String>, Vec<String>) {
    if config.color_detection {
        classify_by_color(style_key, legend, config)
    } else {
        classify_by_text(value, legend)
    }
}

fn classify_by_color(
    style_key: Option<&StyleKey>,
    legend: &ColorLegend,
    config: &ExtractionConfig,
) -> (Option<String>, Vec<String>) {
    match style_key {
        Some(key) => match legend.entry_for_style(key) {
            Some(entry) => (Some(entry.shift_name.clone()), Vec::new()),
            None => {
                let warnings = vec![format!("fill color {key} not found in legend")];
                (config.default_shift.clone(), warnings)
            }
        },
        None => match &config.default_shift {
            Some(default) => (Some(default.clone()), Vec::new()),
            None => (None, vec!["no style on colored cell".to_string()]),
        },
    }
}

fn classify_by_text(value: &CellValue, legend: &ColorLegend) -> (Option<String>, Vec<String>) {
    match value.as_text_trimmed() {
        Some(text) => match legend.entry_for_text(text) {
            Some(entry) => (Some(entry.shift_name.clone()), Vec::new()),
            None => (
                None,
                vec![format!("cell text '{text}' does not match any legend shift")],
            ),
        },
        None => (None, Vec::new()),
    }
}
