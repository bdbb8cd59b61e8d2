//! # shiftsheet-core
//!
//! Core domain model and traits for the shiftsheet schedule extractor.
//!
//! This crate provides:
//! - Grid types: `CellValue`, `CellRef`, `StyleKey`, the `SheetGrid` trait
//! - Reference data: `ColorLegend`, `ColorLegendEntry`
//! - Extraction configuration: `ExtractionConfig` (see [`config`])
//! - Diagnostics: `Diagnostic`, `Severity`, `ValidationReport` (see [`diagnostics`])
//! - Output types: `ExtractedEntry`, `ScheduleEntry`, `MergePlan`
//! - The `ScheduleStore` persistence seam
//!
//! ## Example
//!
//! ```rust
//! use shiftsheet_core::{CellValue, MemoryGrid, SheetGrid, StyleKey};
//!
//! let mut grid = MemoryGrid::new();
//! grid.set_text(9, 1, "Jane Doe");
//! grid.set_number(8, 2, 1.0);
//! grid.set_style(10, 2, StyleKey::normalize("FFCC00").unwrap());
//!
//! assert_eq!(grid.value_at(8, 2), CellValue::Number(1.0));
//! assert_eq!(grid.value_at(0, 0), CellValue::Empty);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub mod config;
pub mod diagnostics;

pub use config::{ConfigError, ExtractionConfig};
pub use diagnostics::{
    DateRowSample, Diagnostic, NameColumnSample, SampleCell, Severity, ValidationReport,
};

// ============================================================================
// Roles
// ============================================================================

/// Organizational role a schedule belongs to.
///
/// One active extraction configuration exists per role at a time; the
/// (name, role) uniqueness is enforced by the external configuration store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Operator,
    Producer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Operator => write!(f, "OPERATOR"),
            Role::Producer => write!(f, "PRODUCER"),
        }
    }
}

// ============================================================================
// Schedule Month
// ============================================================================

/// The calendar month an uploaded sheet belongs to.
///
/// Supplied by the caller, never read from the sheet itself. Day numbers in
/// the date header are combined with this to form full dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMonth {
    pub year: i32,
    /// 1-based calendar month
    pub month: u32,
}

impl ScheduleMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ConfigError> {
        if !(1..=12).contains(&month) {
            return Err(ConfigError::InvalidMonth { year, month });
        }
        Ok(Self { year, month })
    }

    /// Full date for a day number, or `None` if that day does not exist in
    /// this month (e.g. 31 in a 30-day month).
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

impl std::fmt::Display for ScheduleMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ============================================================================
// Cell Values
// ============================================================================

/// Value carried by a single worksheet cell.
///
/// Spreadsheet cells are loosely typed; this tag is fixed at the grid
/// boundary so downstream code dispatches on an explicit variant instead of
/// inspecting types at read time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Number(_) => false,
            CellValue::Text(s) => s.trim().is_empty(),
        }
    }

    /// Interpret this cell as a day-of-month header value.
    ///
    /// Only integral numbers in the closed range `[1, 31]` qualify; anything
    /// else (text, fractions, out-of-range) is rejected and left for the
    /// caller to diagnose.
    pub fn as_day_of_month(&self) -> Option<u32> {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && (1.0..=31.0).contains(n) => {
                Some(*n as u32)
            }
            _ => None,
        }
    }

    /// Trimmed text content, or `None` for empty/numeric cells.
    pub fn as_text_trimmed(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => {
                let t = s.trim();
                (!t.is_empty()).then_some(t)
            }
            _ => None,
        }
    }

    /// Human-readable rendering, used in report samples.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Variant tag for report samples: "empty", "number" or "text".
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
        }
    }
}

/// Zero-based (row, column) coordinate of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}, col {}", self.row, self.col)
    }
}

// ============================================================================
// Style Keys
// ============================================================================

/// Normalized, comparable representation of a cell's fill color.
///
/// Always `#RRGGBB`, uppercase. OOXML ARGB values have the alpha byte
/// stripped so legend codes and sheet fills compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleKey(String);

impl StyleKey {
    /// Normalize a raw color string ("FFCC00", "#ffcc00", "FFFFCC00") to a
    /// canonical `#RRGGBB` key. Returns `None` for values that are not a
    /// 6- or 8-digit hex color.
    pub fn normalize(raw: &str) -> Option<Self> {
        let mut s = raw.trim().trim_start_matches('#').to_string();
        if s.len() == 8 {
            // ARGB: drop the alpha byte
            s = s[2..].to_string();
        }
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(format!("#{}", s.to_ascii_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StyleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Sheet Grid
// ============================================================================

/// Read-only view over a parsed worksheet.
///
/// Coordinates are zero-based everywhere. Out-of-range lookups return
/// `CellValue::Empty` / `None`, never an error; the caller decides whether
/// absence is fatal.
pub trait SheetGrid: Send + Sync {
    fn value_at(&self, row: usize, col: usize) -> CellValue;

    fn style_key_at(&self, row: usize, col: usize) -> Option<StyleKey>;
}

/// In-memory `SheetGrid` backed by sparse coordinate maps.
///
/// Built once per upload by the workbook adapter and discarded after
/// extraction. Also the grid used throughout the test suites.
#[derive(Clone, Debug, Default)]
pub struct MemoryGrid {
    values: HashMap<(usize, usize), CellValue>,
    styles: HashMap<(usize, usize), StyleKey>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, row: usize, col: usize, value: CellValue) {
        if !matches!(value, CellValue::Empty) {
            self.values.insert((row, col), value);
        }
    }

    pub fn set_text(&mut self, row: usize, col: usize, text: impl Into<String>) {
        self.set_value(row, col, CellValue::Text(text.into()));
    }

    pub fn set_number(&mut self, row: usize, col: usize, n: f64) {
        self.set_value(row, col, CellValue::Number(n));
    }

    pub fn set_style(&mut self, row: usize, col: usize, key: StyleKey) {
        self.styles.insert((row, col), key);
    }
}

impl SheetGrid for MemoryGrid {
    fn value_at(&self, row: usize, col: usize) -> CellValue {
        self.values
            .get(&(row, col))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }

    fn style_key_at(&self, row: usize, col: usize) -> Option<StyleKey> {
        self.styles.get(&(row, col)).cloned()
    }
}

// ============================================================================
// Color Legend
// ============================================================================

/// One externally maintained color-to-shift mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorLegendEntry {
    /// Fill color as supplied by the admin workflow (any hex spelling)
    pub color_code: String,
    pub color_name: String,
    pub shift_name: String,
    /// "HH:MM" wall-clock times, kept verbatim from the reference data
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Lookup view over the color legend.
///
/// Color codes are unique in the external store; normalization here only
/// canonicalizes hex spelling so sheet fills and legend codes compare equal.
#[derive(Clone, Debug, Default)]
pub struct ColorLegend {
    entries: Vec<ColorLegendEntry>,
    by_code: HashMap<StyleKey, usize>,
}

impl ColorLegend {
    pub fn new(entries: Vec<ColorLegendEntry>) -> Self {
        let mut by_code = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            if let Some(key) = StyleKey::normalize(&entry.color_code) {
                by_code.insert(key, i);
            }
        }
        Self { entries, by_code }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ColorLegendEntry] {
        &self.entries
    }

    /// Legend entry for a normalized fill key, if any.
    pub fn entry_for_style(&self, key: &StyleKey) -> Option<&ColorLegendEntry> {
        self.by_code.get(key).map(|&i| &self.entries[i])
    }

    /// Case-insensitive match of cell text against legend shift names.
    /// This is the fallback path used when color detection is disabled.
    pub fn entry_for_text(&self, text: &str) -> Option<&ColorLegendEntry> {
        let needle = text.trim();
        self.entries
            .iter()
            .find(|e| e.shift_name.eq_ignore_ascii_case(needle))
    }
}

// ============================================================================
// Extraction Output
// ============================================================================

/// One raw (person, date, shift) record produced by the grid extractor.
///
/// Cells that resolve to no shift still produce an entry with `shift: None`
/// so downstream consumers can distinguish "no shift recorded" from "day not
/// in range".
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEntry {
    pub person_name: String,
    pub date: NaiveDate,
    pub shift: Option<String>,
    /// Originating cell, for traceability
    pub source: CellRef,
    /// Per-cell diagnostics attached to this entry, in emission order
    pub warnings: Vec<String>,
}

// ============================================================================
// Persistence Shapes
// ============================================================================

/// A persisted schedule row as handed to the external store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub person_name: String,
    pub date: NaiveDate,
    pub shift: Option<String>,
    pub role: Role,
}

/// Date window whose persisted entries are retired before insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetireWindow {
    pub role: Role,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl RetireWindow {
    pub fn contains(&self, role: Role, date: NaiveDate) -> bool {
        role == self.role && date >= self.from && date <= self.to
    }
}

/// Full-replace-within-window merge plan.
///
/// Retiring everything in the imported span before inserting guarantees
/// idempotent re-imports and clears stale entries for days the new sheet
/// leaves unscheduled. Applied by the store as one atomic unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePlan {
    /// `None` when the incoming batch is empty (nothing to retire)
    pub retire: Option<RetireWindow>,
    pub insert: Vec<ScheduleEntry>,
}

/// Persistence seam for the reconciler's output.
///
/// `apply` is all-or-nothing: a failing transaction must leave the prior
/// persisted state unchanged.
pub trait ScheduleStore {
    fn apply(&mut self, plan: &MergePlan) -> Result<(), StoreError>;
}

/// Store-side failure applying a merge plan.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transaction failed: {0}")]
    Transaction(String),
}

/// In-memory `ScheduleStore`, used by tests and the dry-run tooling.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub entries: Vec<ScheduleEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleStore for MemoryStore {
    fn apply(&mut self, plan: &MergePlan) -> Result<(), StoreError> {
        if let Some(window) = plan.retire {
            self.entries.retain(|e| !window.contains(e.role, e.date));
        }
        self.entries.extend(plan.insert.iter().cloned());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
