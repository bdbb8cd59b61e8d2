//! Extraction diagnostics
//!
//! Resolvers return `(value, Vec<Diagnostic>)` pairs instead of raising;
//! errors and warnings compose into a single [`ValidationReport`] without
//! early unwinding. Ordering is stable by (row, column) so report output is
//! reproducible regardless of how the cell scan was partitioned.

use serde::Serialize;

use crate::CellRef;

/// Diagnostic severity. Errors are fatal to extraction; warnings never
/// block it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A single extraction diagnostic, optionally anchored to a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<CellRef>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            cell: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            cell: None,
        }
    }

    pub fn at(mut self, cell: CellRef) -> Self {
        self.cell = Some(cell);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Sort key giving the stable (row, column) diagnostic order; unanchored
    /// diagnostics sort first.
    pub fn order_key(&self) -> (usize, usize, usize) {
        match self.cell {
            None => (0, 0, 0),
            Some(c) => (1, c.row, c.col),
        }
    }

    /// Rendered form used in the report's string arrays.
    pub fn render(&self) -> String {
        match self.cell {
            Some(cell) => format!("{cell}: {}", self.message),
            None => self.message.clone(),
        }
    }
}

// ============================================================================
// Report Samples
// ============================================================================

/// Raw date-row cell, included in the report for operator review.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DateRowSample {
    pub column: usize,
    pub value: String,
    #[serde(rename = "type")]
    pub value_type: &'static str,
}

/// Raw name-column cell, included in the report for operator review.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NameColumnSample {
    pub row: usize,
    pub value: String,
    #[serde(rename = "type")]
    pub value_type: &'static str,
}

/// One cell of the bounded preview grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleCell {
    pub row: usize,
    pub col: usize,
    pub value: String,
    pub has_style: bool,
}

// ============================================================================
// Validation Report
// ============================================================================

/// Structured result of a validation/extraction run.
///
/// `errors` non-empty means extraction produced no entries and must not
/// proceed to reconciliation. The samples give the operator a raw view of
/// what the configuration actually selected.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub date_row_samples: Vec<DateRowSample>,
    pub name_column_samples: Vec<NameColumnSample>,
    pub sample_cells: Vec<SampleCell>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn push(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic.render()),
            Severity::Warning => self.warnings.push(diagnostic.render()),
        }
    }

    /// Fold a batch of diagnostics into the report in stable (row, column)
    /// order. The sort is stable, so unanchored diagnostics keep their
    /// emission order.
    pub fn extend_ordered(&mut self, mut diagnostics: Vec<Diagnostic>) {
        diagnostics.sort_by_key(Diagnostic::order_key);
        for d in &diagnostics {
            self.push(d);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn diagnostics_route_by_severity() {
        let mut report = ValidationReport::new();
        report.push(&Diagnostic::error("no data found in date row"));
        report.push(&Diagnostic::warning("non-date value in date row").at(CellRef::new(8, 4)));

        assert!(report.has_errors());
        assert_eq!(report.errors, vec!["no data found in date row"]);
        assert_eq!(
            report.warnings,
            vec!["row 8, col 4: non-date value in date row"]
        );
    }

    #[test]
    fn extend_ordered_sorts_by_cell() {
        let mut report = ValidationReport::new();
        report.extend_ordered(vec![
            Diagnostic::warning("later").at(CellRef::new(10, 3)),
            Diagnostic::warning("earlier").at(CellRef::new(9, 7)),
            Diagnostic::warning("unanchored"),
        ]);
        assert_eq!(
            report.warnings,
            vec![
                "unanchored",
                "row 9, col 7: earlier",
                "row 10, col 3: later",
            ]
        );
    }

    #[test]
    fn report_serializes_with_external_field_names() {
        let mut report = ValidationReport::new();
        report.date_row_samples.push(DateRowSample {
            column: 2,
            value: "1".into(),
            value_type: "number",
        });
        report.sample_cells.push(SampleCell {
            row: 9,
            col: 2,
            value: "co".into(),
            has_style: false,
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["dateRowSamples"][0]["type"], "number");
        assert_eq!(json["sampleCells"][0]["hasStyle"], false);
    }
}
