//! Report formatting and exit codes for CLI output.
//!
//! Exit codes follow the usual compiler convention: 0 when the validation
//! report carries no errors, 1 otherwise. Warnings never affect the exit
//! code.

use std::io::{self, Write};
use std::process;

use shiftsheet_core::ValidationReport;

/// Exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// No errors (warnings allowed)
    Success = 0,
    /// One or more errors in the validation report
    Failure = 1,
}

impl ExitCode {
    pub fn from_error_count(count: usize) -> Self {
        if count > 0 {
            ExitCode::Failure
        } else {
            ExitCode::Success
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code as u8)
    }
}

/// Write a validation report in human-readable form.
///
/// One line per diagnostic, then a summary line. Raw samples are appended
/// only when `samples` is set, since they are noisy on healthy sheets.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ValidationReport,
    samples: bool,
) -> io::Result<()> {
    for message in &report.errors {
        writeln!(out, "error: {message}")?;
    }
    for message in &report.warnings {
        writeln!(out, "warning: {message}")?;
    }
    writeln!(
        out,
        "{} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    )?;

    if samples {
        writeln!(out, "\ndate row:")?;
        for s in &report.date_row_samples {
            writeln!(out, "  col {}: {} ({})", s.column, s.value, s.value_type)?;
        }
        writeln!(out, "name column:")?;
        for s in &report.name_column_samples {
            writeln!(out, "  row {}: {} ({})", s.row, s.value, s.value_type)?;
        }
        writeln!(out, "grid cells:")?;
        for s in &report.sample_cells {
            let styled = if s.has_style { " [styled]" } else { "" };
            writeln!(out, "  ({}, {}): {}{}", s.row, s.col, s.value, styled)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shiftsheet_core::{CellRef, Diagnostic};

    #[test]
    fn exit_code_follows_error_count() {
        assert_eq!(ExitCode::from_error_count(0), ExitCode::Success);
        assert_eq!(ExitCode::from_error_count(3), ExitCode::Failure);
        assert!(ExitCode::from_error_count(0).is_success());
    }

    #[test]
    fn report_renders_one_line_per_diagnostic() {
        let mut report = ValidationReport::default();
        report.push(&Diagnostic::error("no data found in date row"));
        report.push(
            &Diagnostic::warning("non-date value in date row: 'Wed'")
                .at(CellRef { row: 8, col: 4 }),
        );

        let mut buf = Vec::new();
        write_report(&mut buf, &report, false).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "error: no data found in date row\n\
             warning: row 8, col 4: non-date value in date row: 'Wed'\n\
             1 error(s), 1 warning(s)\n"
        );
    }
}
