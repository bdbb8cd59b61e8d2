//! Name-band resolution
//!
//! Reads the configured name column across the name band, optionally merging
//! first-name/last-name row pairs, and flags coordinator rows. Flagged rows
//! are surfaced, never silently dropped; whether they take part in shift
//! accounting is the extractor's decision.

use shiftsheet_core::{CellRef, Diagnostic, ExtractionConfig, SheetGrid};

/// A person resolved from the name band.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPerson {
    pub name: String,
    /// Row the person's shift cells live on (the first row of a merged pair)
    pub row: usize,
    /// Row matched a coordinator/supervisory pattern
    pub coordinator: bool,
}

/// Resolve the name band into the ordered person list.
///
/// Empty rows are skipped silently (sparse bands are valid). With
/// `split_name_rows`, a populated row immediately followed by another
/// populated row is merged into one "first last" record anchored on the
/// upper row. An empty final list is fatal.
pub fn resolve_name_band(
    grid: &dyn SheetGrid,
    config: &ExtractionConfig,
) -> (Vec<ResolvedPerson>, Vec<Diagnostic>) {
    let mut persons = Vec::new();
    let mut diagnostics = Vec::new();

    let mut row = config.first_name_row;
    while row <= config.last_name_row {
        let value = grid.value_at(row, config.name_column);
        let Some(text) = value.as_text_trimmed().map(str::to_string) else {
            row += 1;
            continue;
        };

        let mut name = text;
        let anchor = row;

        if config.split_name_rows && row < config.last_name_row {
            let next = grid.value_at(row + 1, config.name_column);
            if let Some(last_name) = next.as_text_trimmed() {
                name = format!("{name} {last_name}");
                row += 1;
            }
        }

        let coordinator = config.matches_coordinator_pattern(&name);
        if coordinator {
            diagnostics.push(
                Diagnostic::warning(format!("coordinator-pattern row: '{name}'"))
                    .at(CellRef::new(anchor, config.name_column)),
            );
        }

        persons.push(ResolvedPerson {
            name,
            row: anchor,
            coordinator,
        });
        row += 1;
    }

    if persons.is_empty() {
        diagnostics.push(Diagnostic::error("no names found in configured name band"));
    }

    (persons, diagnostics)
}
