//! XLSX workbook loading
//!
//! Two passes over the same file: calamine reads the cell values, then a
//! zip + XML pass (see [`crate::styles`]) attaches fill-color style keys to
//! the cells that carry one.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use shiftsheet_core::{CellValue, MemoryGrid, StyleKey};
use tracing::debug;

use crate::styles;
use crate::SheetIoError;

/// Load a worksheet into a [`MemoryGrid`], values and fill styles included.
///
/// `sheet = None` selects the first worksheet. Rows and columns are
/// zero-based and absolute, so a range that starts at B9 lands at
/// (8, 1) rather than (0, 0).
pub fn load_workbook_grid(path: &Path, sheet: Option<&str>) -> Result<MemoryGrid, SheetIoError> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e: calamine::XlsxError| SheetIoError::Workbook(e.to_string()))?;

    let sheet_name = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(SheetIoError::SheetNotFound(name.to_string()));
            }
            name.to_string()
        }
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SheetIoError::Workbook("workbook has no worksheets".to_string()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| SheetIoError::Workbook(e.to_string()))?;

    let mut grid = MemoryGrid::default();
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    for (r, row) in range.rows().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let abs_row = start_row as usize + r;
            let abs_col = start_col as usize + c;
            match convert_cell(cell) {
                CellValue::Empty => {}
                value => grid.set_value(abs_row, abs_col, value),
            }
        }
    }

    apply_fill_styles(path, sheet, &mut grid)?;
    debug!(sheet = %sheet_name, "loaded worksheet");
    Ok(grid)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn apply_fill_styles(
    path: &Path,
    sheet: Option<&str>,
    grid: &mut MemoryGrid,
) -> Result<(), SheetIoError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let workbook_xml = read_part(&mut archive, "xl/workbook.xml")?;
    let rels_xml = read_part(&mut archive, "xl/_rels/workbook.xml.rels")?;
    let part = styles::sheet_part_path(&workbook_xml, &rels_xml, sheet)?;

    let styles_xml = read_part(&mut archive, "xl/styles.xml")?;
    let per_style = styles::fill_color_per_style(&styles_xml)?;

    let sheet_xml = read_part(&mut archive, &part)?;
    let style_ids = styles::cell_style_ids(&sheet_xml)?;

    let mut applied = 0usize;
    for ((row, col), style_id) in style_ids {
        let raw = per_style.get(style_id).cloned().flatten();
        if let Some(key) = raw.as_deref().and_then(StyleKey::normalize) {
            grid.set_style(row, col, key);
            applied += 1;
        }
    }
    debug!(part = %part, applied, "applied fill styles");
    Ok(())
}

fn read_part(
    archive: &mut zip::ZipArchive<File>,
    name: &str,
) -> Result<String, SheetIoError> {
    let mut part = archive.by_name(name)?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}
