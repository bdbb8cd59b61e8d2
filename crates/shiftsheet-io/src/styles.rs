//! OOXML fill-style extraction
//!
//! calamine surfaces cell values but not fills, so the per-cell fill colors
//! come from a targeted pass over the XLSX package: `xl/styles.xml` yields
//! the fill color per cell-format index, and the worksheet part yields the
//! format index per cell (`<c r="B9" s="3">`). Only literal `rgb` colors are
//! resolved; theme/indexed fills carry no key and the cell counts as
//! unstyled.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::SheetIoError;

fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(Result::ok)
        .find(|a| a.key.as_ref() == name)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Convert an A1 reference ("B9") to zero-based (row, col).
pub fn a1_to_row_col(a1: &str) -> Option<(usize, usize)> {
    let split = a1.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = a1.split_at(split);
    if letters.is_empty() {
        return None;
    }

    let mut col: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}

/// Parse `xl/styles.xml` into the raw fill color per cell-format index.
///
/// Walks `<fills>` collecting each fill's `fgColor rgb` (pattern "none"
/// yields no color), then `<cellXfs>` mapping each `<xf fillId="..">` to
/// that fill. The result is indexed by the `s` attribute of worksheet
/// cells.
pub fn fill_color_per_style(styles_xml: &str) -> Result<Vec<Option<String>>, SheetIoError> {
    let mut reader = Reader::from_str(styles_xml);
    let mut buf: Vec<u8> = Vec::new();

    let mut fills: Vec<Option<String>> = Vec::new();
    let mut styles: Vec<Option<String>> = Vec::new();

    let mut in_fills = false;
    let mut in_fill = false;
    let mut in_cellxfs = false;
    let mut cur_pattern_none = false;
    let mut cur_color: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"fills" => in_fills = true,
                b"fill" if in_fills => {
                    in_fill = true;
                    cur_pattern_none = false;
                    cur_color = None;
                }
                b"patternFill" if in_fill => {
                    cur_pattern_none = matches!(
                        attr_value(&e, b"patternType").as_deref(),
                        None | Some("none") | Some("gray125")
                    );
                }
                // Some writers serialize color elements as start/end pairs
                // rather than self-closing tags.
                b"fgColor" | b"bgColor" if in_fill => {
                    if cur_color.is_none() {
                        cur_color = attr_value(&e, b"rgb");
                    }
                }
                b"cellXfs" => in_cellxfs = true,
                b"xf" if in_cellxfs => {
                    styles.push(xf_fill_color(&e, &fills));
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"fill" if in_fills => fills.push(None),
                b"patternFill" if in_fill => {
                    cur_pattern_none = matches!(
                        attr_value(&e, b"patternType").as_deref(),
                        None | Some("none") | Some("gray125")
                    );
                }
                b"fgColor" | b"bgColor" if in_fill => {
                    if cur_color.is_none() {
                        cur_color = attr_value(&e, b"rgb");
                    }
                }
                b"xf" if in_cellxfs => {
                    styles.push(xf_fill_color(&e, &fills));
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"fills" => in_fills = false,
                b"fill" if in_fill => {
                    in_fill = false;
                    fills.push(if cur_pattern_none {
                        None
                    } else {
                        cur_color.take()
                    });
                }
                b"cellXfs" => in_cellxfs = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(SheetIoError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(styles)
}

fn xf_fill_color(e: &BytesStart<'_>, fills: &[Option<String>]) -> Option<String> {
    let fill_id: usize = attr_value(e, b"fillId")?.parse().ok()?;
    fills.get(fill_id).cloned().flatten()
}

/// Parse a worksheet part into a (row, col) → cell-format index map.
///
/// Cells without an `s` attribute (or with the default format 0) are
/// omitted.
pub fn cell_style_ids(sheet_xml: &str) -> Result<HashMap<(usize, usize), usize>, SheetIoError> {
    let mut reader = Reader::from_str(sheet_xml);
    let mut buf: Vec<u8> = Vec::new();
    let mut out: HashMap<(usize, usize), usize> = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"c" {
                    let Some(a1) = attr_value(&e, b"r") else {
                        continue;
                    };
                    let style_id = attr_value(&e, b"s")
                        .and_then(|s| s.parse::<usize>().ok())
                        .unwrap_or(0);
                    if style_id == 0 {
                        continue;
                    }
                    if let Some(pos) = a1_to_row_col(&a1) {
                        out.insert(pos, style_id);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SheetIoError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

/// Resolve the package path of a worksheet part from `xl/workbook.xml` and
/// its relationships. `wanted = None` selects the first sheet.
pub fn sheet_part_path(
    workbook_xml: &str,
    rels_xml: &str,
    wanted: Option<&str>,
) -> Result<String, SheetIoError> {
    let mut reader = Reader::from_str(workbook_xml);
    let mut buf: Vec<u8> = Vec::new();
    let mut rel_id: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"sheet" {
                    let name = attr_value(&e, b"name").unwrap_or_default();
                    let matches = match wanted {
                        Some(w) => name == w,
                        None => rel_id.is_none(),
                    };
                    if matches {
                        rel_id = attr_value(&e, b"r:id");
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SheetIoError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    let rel_id = rel_id
        .ok_or_else(|| SheetIoError::SheetNotFound(wanted.unwrap_or("<first>").to_string()))?;

    let mut reader = Reader::from_str(rels_xml);
    buf.clear();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"Relationship"
                    && attr_value(&e, b"Id").as_deref() == Some(rel_id.as_str())
                {
                    let target = attr_value(&e, b"Target").unwrap_or_default();
                    let path = if let Some(absolute) = target.strip_prefix('/') {
                        absolute.to_string()
                    } else {
                        format!("xl/{target}")
                    };
                    return Ok(path);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SheetIoError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Err(SheetIoError::Xml(format!(
        "workbook relationship '{rel_id}' has no target"
    )))
}
