//! Schedule reconciliation
//!
//! Turns a batch of extracted entries into the full-replace-within-window
//! merge plan handed to the external store: retire every persisted entry for
//! the role inside the batch's date span, then insert the new entries. Pure
//! computation; the store applies the plan as one atomic transaction.

use shiftsheet_core::{
    ExtractedEntry, MergePlan, RetireWindow, Role, ScheduleEntry,
};
use thiserror::Error;

use crate::extractor::Extraction;

/// Build the merge plan for a batch of extracted entries.
///
/// The retire window is the min-max date span of the batch, so a sheet with
/// nobody scheduled on some day clears that day's stale entries. An empty
/// batch yields a plan that retires nothing.
pub fn reconcile(entries: &[ExtractedEntry], role: Role) -> MergePlan {
    let span = entries
        .iter()
        .map(|e| e.date)
        .fold(None, |acc: Option<(_, _)>, date| match acc {
            None => Some((date, date)),
            Some((min, max)) => Some((min.min(date), max.max(date))),
        });

    let insert = entries
        .iter()
        .map(|e| ScheduleEntry {
            person_name: e.person_name.clone(),
            date: e.date,
            shift: e.shift.clone(),
            role,
        })
        .collect();

    MergePlan {
        retire: span.map(|(from, to)| RetireWindow { role, from, to }),
        insert,
    }
}

/// Commit-path guard: refuse to plan when the extraction reported errors.
pub fn plan_commit(extraction: &Extraction, role: Role) -> Result<MergePlan, CommitError> {
    if extraction.report.has_errors() {
        return Err(CommitError::ReportHasErrors {
            count: extraction.report.errors.len(),
        });
    }
    Ok(reconcile(&extraction.entries, role))
}

/// Refusal to hand an invalid extraction to the store.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("extraction reported {count} error(s); refusing to build a merge plan")]
    ReportHasErrors { count: usize },
}
