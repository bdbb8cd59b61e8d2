//! Idempotence of the full-replace-within-window policy: applying the same
//! sheet twice leaves the store in the same final state, and a re-imported
//! sheet clears stale entries for days it leaves unscheduled.

use shiftsheet_core::{
    ColorLegend, ColorLegendEntry, ExtractionConfig, MemoryGrid, MemoryStore, Role, ScheduleMonth,
    ScheduleStore, StyleKey,
};
use shiftsheet_extract::{extract, plan_commit};

fn config() -> ExtractionConfig {
    ExtractionConfig {
        role: Role::Operator,
        date_row: 0,
        name_column: 0,
        first_name_row: 1,
        last_name_row: 3,
        first_date_column: 1,
        last_date_column: 5,
        dynamic_columns: false,
        skip_values: vec![],
        valid_patterns: vec![],
        color_detection: true,
        default_shift: None,
        split_name_rows: false,
    }
}

fn legend() -> ColorLegend {
    ColorLegend::new(vec![ColorLegendEntry {
        color_code: "FFCC00".into(),
        color_name: "Amber".into(),
        shift_name: "Morning".into(),
        start_time: "06:00".into(),
        end_time: "14:00".into(),
        description: None,
    }])
}

fn roster_grid() -> MemoryGrid {
    let mut grid = MemoryGrid::new();
    grid.set_number(0, 1, 1.0);
    grid.set_number(0, 2, 2.0);
    grid.set_text(1, 0, "Jane Doe");
    grid.set_text(2, 0, "John Roe");
    grid.set_style(1, 1, StyleKey::normalize("FFCC00").unwrap());
    grid.set_style(2, 2, StyleKey::normalize("FFCC00").unwrap());
    grid
}

#[test]
fn reimporting_the_same_sheet_is_idempotent() {
    let month = ScheduleMonth::new(2026, 3).unwrap();
    let grid = roster_grid();
    let mut store = MemoryStore::new();

    let first = extract(&grid, &config(), &legend(), month);
    let plan = plan_commit(&first, Role::Operator).unwrap();
    store.apply(&plan).unwrap();
    let after_first = store.entries.clone();

    let second = extract(&grid, &config(), &legend(), month);
    let plan = plan_commit(&second, Role::Operator).unwrap();
    store.apply(&plan).unwrap();

    assert_eq!(store.entries, after_first);
}

#[test]
fn reimport_clears_days_the_new_sheet_leaves_unscheduled() {
    let month = ScheduleMonth::new(2026, 3).unwrap();
    let mut store = MemoryStore::new();

    let extraction = extract(&roster_grid(), &config(), &legend(), month);
    store
        .apply(&plan_commit(&extraction, Role::Operator).unwrap())
        .unwrap();
    assert!(store
        .entries
        .iter()
        .any(|e| e.person_name == "John Roe" && e.shift.is_some()));

    // Same month, but John Roe's colored cell is gone
    let mut corrected = MemoryGrid::new();
    corrected.set_number(0, 1, 1.0);
    corrected.set_number(0, 2, 2.0);
    corrected.set_text(1, 0, "Jane Doe");
    corrected.set_text(2, 0, "John Roe");
    corrected.set_style(1, 1, StyleKey::normalize("FFCC00").unwrap());

    let extraction = extract(&corrected, &config(), &legend(), month);
    store
        .apply(&plan_commit(&extraction, Role::Operator).unwrap())
        .unwrap();

    // His day-2 entry now records no shift instead of the stale "Morning"
    let johns: Vec<_> = store
        .entries
        .iter()
        .filter(|e| e.person_name == "John Roe" && e.shift.is_some())
        .collect();
    assert!(johns.is_empty());
}

#[test]
fn other_roles_outside_the_plan_survive_reimport() {
    let month = ScheduleMonth::new(2026, 3).unwrap();
    let mut store = MemoryStore::new();

    // Seed a producer entry in the same window
    let producer_grid = roster_grid();
    let mut producer_cfg = config();
    producer_cfg.role = Role::Producer;
    let extraction = extract(&producer_grid, &producer_cfg, &legend(), month);
    store
        .apply(&plan_commit(&extraction, Role::Producer).unwrap())
        .unwrap();
    let producer_count = store
        .entries
        .iter()
        .filter(|e| e.role == Role::Producer)
        .count();
    assert!(producer_count > 0);

    let extraction = extract(&roster_grid(), &config(), &legend(), month);
    store
        .apply(&plan_commit(&extraction, Role::Operator).unwrap())
        .unwrap();

    assert_eq!(
        store
            .entries
            .iter()
            .filter(|e| e.role == Role::Producer)
            .count(),
        producer_count
    );
}
