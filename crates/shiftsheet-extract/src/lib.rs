//! # shiftsheet-extract
//!
//! Pure extraction engine over the [`shiftsheet_core::SheetGrid`] contract.
//!
//! This crate provides:
//! - Date-header resolution (column → calendar date)
//! - Name-band resolution (row → person, with coordinator flagging)
//! - Color-to-shift classification against the external legend
//! - The rectangular grid scan producing `ExtractedEntry` records
//! - The full-replace-within-window reconciler producing a `MergePlan`
//!
//! Everything here is computationally pure: no I/O, no ambient state. The
//! configuration and color legend are explicit immutable parameters to every
//! call, and per-cell work is independent, so the scan parallelizes by row.
//!
//! ## Example
//!
//! ```rust
//! use shiftsheet_core::{ColorLegend, ExtractionConfig, MemoryGrid, Role, ScheduleMonth};
//! use shiftsheet_extract::extract;
//!
//! let mut grid = MemoryGrid::new();
//! grid.set_number(2, 1, 1.0);
//! grid.set_text(3, 0, "Jane Doe");
//! grid.set_text(4, 0, "John Roe");
//!
//! let config = ExtractionConfig {
//!     role: Role::Operator,
//!     date_row: 2,
//!     name_column: 0,
//!     first_name_row: 3,
//!     last_name_row: 4,
//!     first_date_column: 1,
//!     last_date_column: 3,
//!     dynamic_columns: false,
//!     skip_values: vec![],
//!     valid_patterns: vec![],
//!     color_detection: false,
//!     default_shift: None,
//!     split_name_rows: false,
//! };
//! let month = ScheduleMonth::new(2026, 3).unwrap();
//!
//! let extraction = extract(&grid, &config, &ColorLegend::default(), month);
//! assert!(!extraction.report.has_errors());
//! assert_eq!(extraction.entries.len(), 2);
//! ```

pub mod colors;
pub mod dates;
pub mod extractor;
pub mod names;
pub mod reconcile;

pub use colors::classify_shift;
pub use dates::resolve_date_header;
pub use extractor::{extract, Extraction};
pub use names::{resolve_name_band, ResolvedPerson};
pub use reconcile::{plan_commit, reconcile, CommitError};
