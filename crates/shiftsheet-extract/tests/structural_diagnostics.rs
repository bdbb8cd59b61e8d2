//! Diagnostic behavior for malformed sheets and configurations: junk in the
//! date row, empty bands, inverted rectangles, dynamic-width discovery.

use shiftsheet_core::{ColorLegend, ExtractionConfig, MemoryGrid, Role, ScheduleMonth};
use shiftsheet_extract::extract;

fn config() -> ExtractionConfig {
    ExtractionConfig {
        role: Role::Producer,
        date_row: 0,
        name_column: 0,
        first_name_row: 1,
        last_name_row: 4,
        first_date_column: 1,
        last_date_column: 6,
        dynamic_columns: false,
        skip_values: vec![],
        valid_patterns: vec!["koordinator".into()],
        color_detection: false,
        default_shift: None,
        split_name_rows: false,
    }
}

fn march() -> ScheduleMonth {
    ScheduleMonth::new(2026, 3).unwrap()
}

#[test]
fn junk_date_cells_warn_but_extraction_proceeds() {
    let mut grid = MemoryGrid::new();
    grid.set_number(0, 1, 1.0);
    grid.set_number(0, 2, 32.0);
    grid.set_number(0, 3, 0.0);
    grid.set_text(0, 4, "Wed");
    grid.set_text(1, 0, "Jane Doe");

    let extraction = extract(&grid, &config(), &ColorLegend::default(), march());

    assert!(extraction.report.errors.is_empty());
    // 32, 0 and "Wed" each warn and are excluded from the date mapping
    assert_eq!(
        extraction
            .report
            .warnings
            .iter()
            .filter(|w| w.contains("non-date value in date row"))
            .count(),
        3
    );
    assert_eq!(extraction.entries.len(), 1);
}

#[test]
fn empty_date_row_aborts_with_no_entries() {
    let mut grid = MemoryGrid::new();
    grid.set_text(1, 0, "Jane Doe");

    let extraction = extract(&grid, &config(), &ColorLegend::default(), march());

    assert!(extraction
        .report
        .errors
        .iter()
        .any(|e| e.contains("no data found in date row")));
    assert!(extraction.entries.is_empty());
}

#[test]
fn empty_name_band_aborts_with_no_entries() {
    let mut grid = MemoryGrid::new();
    grid.set_number(0, 1, 1.0);

    let extraction = extract(&grid, &config(), &ColorLegend::default(), march());

    assert!(extraction
        .report
        .errors
        .iter()
        .any(|e| e.contains("no names found in configured name band")));
    assert!(extraction.entries.is_empty());
}

#[test]
fn swapped_name_rows_fail_independent_of_sheet_contents() {
    let mut cfg = config();
    cfg.first_name_row = 4;
    cfg.last_name_row = 1;

    // A perfectly valid sheet must not rescue an invalid rectangle.
    let mut grid = MemoryGrid::new();
    grid.set_number(0, 1, 1.0);
    grid.set_text(1, 0, "Jane Doe");

    let extraction = extract(&grid, &cfg, &ColorLegend::default(), march());
    assert_eq!(extraction.report.errors.len(), 1);
    assert!(extraction.report.errors[0].contains("first name row"));
    assert!(extraction.entries.is_empty());
}

#[test]
fn impossible_day_for_month_is_fatal() {
    let mut grid = MemoryGrid::new();
    grid.set_number(0, 1, 31.0); // April has 30 days
    grid.set_text(1, 0, "Jane Doe");

    let april = ScheduleMonth::new(2026, 4).unwrap();
    let extraction = extract(&grid, &config(), &ColorLegend::default(), april);

    assert!(extraction
        .report
        .errors
        .iter()
        .any(|e| e.contains("day 31 does not exist")));
    assert!(extraction.entries.is_empty());
}

#[test]
fn coordinator_rows_warn_and_stay_out_of_entries() {
    let mut grid = MemoryGrid::new();
    grid.set_number(0, 1, 1.0);
    grid.set_text(1, 0, "Jane Doe");
    grid.set_text(2, 0, "Ann KOORDINATOR");
    grid.set_text(2, 1, "Morning");

    let extraction = extract(&grid, &config(), &ColorLegend::default(), march());

    assert!(extraction.report.errors.is_empty());
    assert!(extraction
        .report
        .warnings
        .iter()
        .any(|w| w.contains("coordinator-pattern row")));
    assert!(extraction
        .entries
        .iter()
        .all(|e| e.person_name == "Jane Doe"));
}

#[test]
fn dynamic_columns_discover_shifted_date_band() {
    let mut cfg = config();
    cfg.dynamic_columns = true;
    cfg.last_date_column = 3;

    let mut grid = MemoryGrid::new();
    // The month's days start past the configured bound
    grid.set_number(0, 8, 1.0);
    grid.set_number(0, 9, 2.0);
    grid.set_text(1, 0, "Jane Doe");

    let extraction = extract(&grid, &cfg, &ColorLegend::default(), march());

    assert!(extraction.report.errors.is_empty());
    assert_eq!(extraction.entries.len(), 2);
    assert_eq!(extraction.entries[0].source.col, 8);
}
