//! Date-header resolution
//!
//! Reads the configured date row across the date band and yields an ordered
//! column → calendar date mapping. Range discovery and cell reading are two
//! separate phases: the effective column range is fixed first, then scanned,
//! so dynamic-width behavior stays reproducible.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use shiftsheet_core::{CellRef, Diagnostic, ExtractionConfig, ScheduleMonth, SheetGrid};

/// Hard ceiling for dynamic widening: one calendar month's maximum span.
const MAX_MONTH_SPAN: usize = 31;

/// Resolve the date header into an ordered column → date mapping.
///
/// Columns holding an integral day number in `[1, 31]` that exists in
/// `month` are accepted. Populated cells holding anything else produce a
/// warning and are excluded; a day number the month does not have (31 in a
/// 30-day month) is an error for that column, since it indicates a
/// configuration/month mismatch rather than sheet noise. Zero accepted
/// columns overall is fatal.
pub fn resolve_date_header(
    grid: &dyn SheetGrid,
    config: &ExtractionConfig,
    month: ScheduleMonth,
) -> (BTreeMap<usize, NaiveDate>, Vec<Diagnostic>) {
    let configured = config.first_date_column..=config.last_date_column;
    let (mut dates, mut diagnostics) = scan_range(grid, config, month, configured.clone());

    // Phase 1 fallback: with dynamic columns, an empty configured range
    // widens once to the month-span ceiling before giving up.
    if dates.is_empty() && config.dynamic_columns {
        let widened_last = config.first_date_column + MAX_MONTH_SPAN - 1;
        if widened_last > config.last_date_column {
            tracing::debug!(
                from = config.last_date_column,
                to = widened_last,
                "date row empty in configured range, widening scan"
            );
            let (widened, widened_diags) =
                scan_range(grid, config, month, config.first_date_column..=widened_last);
            dates = widened;
            diagnostics = widened_diags;
        }
    }

    if dates.is_empty() {
        diagnostics.push(Diagnostic::error("no data found in date row"));
    }

    (dates, diagnostics)
}

fn scan_range(
    grid: &dyn SheetGrid,
    config: &ExtractionConfig,
    month: ScheduleMonth,
    columns: std::ops::RangeInclusive<usize>,
) -> (BTreeMap<usize, NaiveDate>, Vec<Diagnostic>) {
    let mut dates = BTreeMap::new();
    let mut diagnostics = Vec::new();

    for col in columns {
        let cell = CellRef::new(config.date_row, col);
        let value = grid.value_at(config.date_row, col);
        if value.is_empty() {
            continue;
        }
        match value.as_day_of_month() {
            Some(day) => match month.date(day) {
                Some(date) => {
                    dates.insert(col, date);
                }
                None => {
                    diagnostics.push(
                        Diagnostic::error(format!("day {day} does not exist in {month}")).at(cell),
                    );
                }
            },
            None => {
                diagnostics.push(
                    Diagnostic::warning(format!(
                        "non-date value in date row: '{}'",
                        value.display_text()
                    ))
                    .at(cell),
                );
            }
        }
    }

    (dates, diagnostics)
}
