//! Grid extraction
//!
//! Orchestrates the date-header and name-band resolvers over the configured
//! rectangle and classifies every non-skipped cell. Cells are independent,
//! so the scan is partitioned by person row with rayon; diagnostics are
//! merged back in (row, column) order so reports stay reproducible.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use shiftsheet_core::{
    CellRef, ColorLegend, DateRowSample, Diagnostic, ExtractedEntry, ExtractionConfig,
    NameColumnSample, SampleCell, ScheduleMonth, SheetGrid, ValidationReport,
};

use crate::colors::classify_shift;
use crate::dates::resolve_date_header;
use crate::names::{resolve_name_band, ResolvedPerson};

/// Upper bound on the preview grid included in the report.
const SAMPLE_CELL_LIMIT: usize = 30;

/// Result of one extraction run: the raw entries plus the validation report.
///
/// A report with errors always carries an empty entry set; a partial set is
/// never handed downstream.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    pub entries: Vec<ExtractedEntry>,
    pub report: ValidationReport,
}

/// Run the full extraction over one configured region of one sheet.
///
/// Configuration is validated first; a degenerate rectangle rejects the run
/// before any cell is read. Date and name resolution are independent; their
/// diagnostics are merged, and any fatal diagnostic short-circuits the cell
/// scan.
pub fn extract(
    grid: &dyn SheetGrid,
    config: &ExtractionConfig,
    legend: &ColorLegend,
    month: ScheduleMonth,
) -> Extraction {
    let span = tracing::debug_span!("extract", role = %config.role, month = %month);
    let _guard = span.enter();

    let mut report = ValidationReport::new();

    // Fail fast: no cell is scanned against an invalid rectangle.
    if let Err(e) = config.validate() {
        report.push(&Diagnostic::error(e.to_string()));
        return Extraction {
            entries: Vec::new(),
            report,
        };
    }

    let (dates, date_diags) = resolve_date_header(grid, config, month);
    let (persons, name_diags) = resolve_name_band(grid, config);

    let mut diagnostics = date_diags;
    diagnostics.extend(name_diags);
    report.extend_ordered(diagnostics);

    fill_samples(&mut report, grid, config, &dates);

    if report.has_errors() {
        return Extraction {
            entries: Vec::new(),
            report,
        };
    }

    // Coordinator rows were surfaced by the resolver; they stay out of
    // shift accounting.
    let scanned: Vec<&ResolvedPerson> = persons.iter().filter(|p| !p.coordinator).collect();

    let mut per_row: Vec<(usize, Vec<ExtractedEntry>, Vec<Diagnostic>)> = scanned
        .par_iter()
        .map(|person| {
            let (entries, diags) = scan_person_row(grid, config, legend, person, &dates);
            (person.row, entries, diags)
        })
        .collect();
    per_row.sort_by_key(|(row, _, _)| *row);

    let mut entries = Vec::new();
    let mut cell_diags = Vec::new();
    for (_, row_entries, row_diags) in per_row {
        entries.extend(row_entries);
        cell_diags.extend(row_diags);
    }
    report.extend_ordered(cell_diags);

    tracing::debug!(
        entries = entries.len(),
        warnings = report.warnings.len(),
        "extraction complete"
    );

    Extraction { entries, report }
}

/// Scan one person's row across the resolved date columns.
///
/// Skip-value cells produce nothing at all; every other cell produces one
/// entry, including cells that resolve to no shift.
fn scan_person_row(
    grid: &dyn SheetGrid,
    config: &ExtractionConfig,
    legend: &ColorLegend,
    person: &ResolvedPerson,
    dates: &BTreeMap<usize, NaiveDate>,
) -> (Vec<ExtractedEntry>, Vec<Diagnostic>) {
    let mut entries = Vec::new();
    let mut diagnostics = Vec::new();

    for (&col, &date) in dates {
        let cell = CellRef::new(person.row, col);
        let value = grid.value_at(person.row, col);

        if let Some(text) = value.as_text_trimmed() {
            if config.is_skip_value(text) {
                continue;
            }
        }

        let style_key = grid.style_key_at(person.row, col);
        let (shift, warnings) = classify_shift(style_key.as_ref(), &value, legend, config);

        for w in &warnings {
            diagnostics.push(Diagnostic::warning(w.clone()).at(cell));
        }
        entries.push(ExtractedEntry {
            person_name: person.name.clone(),
            date,
            shift,
            source: cell,
            warnings,
        });
    }

    (entries, diagnostics)
}

/// Copy bounded raw previews of what the configuration selected into the
/// report, for operator review in dry-run mode.
fn fill_samples(
    report: &mut ValidationReport,
    grid: &dyn SheetGrid,
    config: &ExtractionConfig,
    dates: &BTreeMap<usize, NaiveDate>,
) {
    for col in config.first_date_column..=config.last_date_column {
        let value = grid.value_at(config.date_row, col);
        report.date_row_samples.push(DateRowSample {
            column: col,
            value: value.display_text(),
            value_type: value.type_name(),
        });
    }

    for row in config.first_name_row..=config.last_name_row {
        let value = grid.value_at(row, config.name_column);
        report.name_column_samples.push(NameColumnSample {
            row,
            value: value.display_text(),
            value_type: value.type_name(),
        });
    }

    'outer: for row in config.first_name_row..=config.last_name_row {
        for &col in dates.keys() {
            if report.sample_cells.len() >= SAMPLE_CELL_LIMIT {
                break 'outer;
            }
            let value = grid.value_at(row, col);
            report.sample_cells.push(SampleCell {
                row,
                col,
                value: value.display_text(),
                has_style: grid.style_key_at(row, col).is_some(),
            });
        }
    }
}
