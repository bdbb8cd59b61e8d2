//! # shiftsheet-io
//!
//! Input adapters turning external artifacts into core types:
//! - XLSX workbooks → [`shiftsheet_core::MemoryGrid`] (cell values via
//!   calamine, fill colors via a targeted pass over the OOXML package)
//! - Configuration-store JSON → [`shiftsheet_core::ExtractionConfig`]
//! - Color-legend JSON → [`shiftsheet_core::ColorLegend`]
//!
//! The extraction engine itself never touches files; everything here runs
//! before extraction starts, so the engine stays pure.

use thiserror::Error;

pub mod json;
pub mod styles;
pub mod workbook;

pub use json::{load_config, load_legend, parse_config, parse_legend};
pub use workbook::load_workbook_grid;

/// Failure reading an uploaded workbook or its companion JSON.
#[derive(Debug, Error)]
pub enum SheetIoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("worksheet '{0}' not found")]
    SheetNotFound(String),

    #[error("OOXML package error: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("malformed workbook XML: {0}")]
    Xml(String),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}
