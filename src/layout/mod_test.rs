use super::*;

fn cells(n: usize) -> Vec<Seat> {
    (0..n).map(|i| Seat::space(format!("c-{i}"))).collect()
}

// =========================================================================
// GridLayout
// =========================================================================

#[test]
fn grid_new_accepts_matching_cells() {
    let grid = GridLayout::new(3, 2, cells(6)).unwrap();
    assert_eq!(grid.cols(), 3);
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cells().len(), 6);
}

#[test]
fn grid_new_rejects_zero_dimension() {
    let err = GridLayout::new(0, 2, Vec::new()).unwrap_err();
    assert_eq!(err, LayoutError::ZeroDimension { cols: 0, rows: 2 });
}

#[test]
fn grid_new_rejects_cell_count_mismatch() {
    let err = GridLayout::new(3, 2, cells(5)).unwrap_err();
    assert_eq!(err, LayoutError::CellCountMismatch { cols: 3, rows: 2, expected: 6, actual: 5 });
}

#[test]
fn grid_new_rejects_duplicate_ids() {
    let mut cells = cells(4);
    cells[3].id = "c-1".into();
    let err = GridLayout::new(2, 2, cells).unwrap_err();
    assert_eq!(err, LayoutError::DuplicateId("c-1".into()));
}

#[test]
fn grid_blank_rejects_oversized() {
    let err = GridLayout::blank("f", 200, 200).unwrap_err();
    assert!(matches!(err, LayoutError::TooLarge { max: MAX_GRID_CELLS, .. }));
}

#[test]
fn grid_blank_is_all_space_with_floor_scoped_ids() {
    let grid = GridLayout::blank("f1", 4, 3).unwrap();
    assert_eq!(grid.cells().len(), 12);
    assert!(grid.cells().iter().all(|c| c.kind == SeatKind::Space && c.label.is_empty()));
    assert_eq!(grid.cells()[0].id, "f1-c-0");
    assert_eq!(grid.cells()[11].id, "f1-c-11");
}

#[test]
fn grid_deserialize_rejects_bad_dimensions() {
    let json = serde_json::json!({
        "cols": 2,
        "rows": 2,
        "cells": [{ "id": "a", "label": "", "status": "Available", "type": "space" }]
    });
    let err = serde_json::from_value::<GridLayout>(json).unwrap_err();
    assert!(err.to_string().contains("needs 4 cells"));
}

// =========================================================================
// Wire format
// =========================================================================

#[test]
fn seat_kind_wire_names_are_kebab_case() {
    for kind in SeatKind::ALL {
        let json = serde_json::to_value(kind).unwrap();
        assert_eq!(json, kind.as_str());
    }
    assert_eq!(serde_json::to_value(SeatKind::CoffeeStation).unwrap(), "coffee-station");
}

#[test]
fn seat_serializes_kind_as_type_and_omits_missing_rotation() {
    let json = serde_json::to_value(Seat::space("c-0")).unwrap();
    assert_eq!(json["type"], "space");
    assert_eq!(json["status"], "Available");
    assert!(json.get("rotation").is_none());
}

#[test]
fn floor_layout_is_tagged_by_kind() {
    let floor = Floor {
        id: "f".into(),
        level: 3,
        name: "Grid".into(),
        layout: FloorLayout::Grid(GridLayout::blank("f", 2, 1).unwrap()),
    };
    let json = serde_json::to_value(&floor).unwrap();
    assert_eq!(json["layout"]["kind"], "grid");
    assert_eq!(json["layout"]["cols"], 2);

    let back: Floor = serde_json::from_value(json).unwrap();
    assert_eq!(back, floor);
}

#[test]
fn flexible_layout_fields_default_to_empty() {
    let json = serde_json::json!({ "id": "f", "level": 1, "name": "Hall", "layout": { "kind": "flexible" } });
    let floor: Floor = serde_json::from_value(json).unwrap();
    assert_eq!(floor.layout, FloorLayout::Flexible(FlexibleLayout::default()));
}

#[test]
fn seat_status_parse_is_case_insensitive() {
    assert_eq!(SeatStatus::parse("available"), Some(SeatStatus::Available));
    assert_eq!(SeatStatus::parse(" PENDING "), Some(SeatStatus::Pending));
    assert_eq!(SeatStatus::parse("reserved"), None);
}

// =========================================================================
// Tables
// =========================================================================

#[test]
fn radial_table_spaces_rotations_evenly() {
    let table =
        TableGroup::radial("f", "q1", "Q1", Position::new(20.0, 20.0), 4, SeatKind::GroupSeat, || SeatStatus::Available);
    let rotations: Vec<f64> = table.seats.iter().filter_map(|s| s.rotation).collect();
    assert_eq!(rotations, vec![0.0, 90.0, 180.0, 270.0]);
    assert_eq!(table.id, "f-t-q1");
    assert_eq!(table.seats[0].id, "f-t-q1-s-0");
    assert_eq!(table.seats[3].label, "Q1-4");
    assert!(table.validate_radial().is_ok());
}

#[test]
fn validate_radial_rejects_off_spacing_rotation() {
    let mut table =
        TableGroup::radial("f", "1", "L1", Position::new(0.0, 0.0), 6, SeatKind::Seat, || SeatStatus::Available);
    table.seats[2].rotation = Some(100.0);
    let err = table.validate_radial().unwrap_err();
    assert!(matches!(err, LayoutError::RotationMismatch { index: 2, .. }));
}

#[test]
fn validate_radial_skips_hand_placed_seats() {
    let mut table =
        TableGroup::radial("f", "1", "L1", Position::new(0.0, 0.0), 6, SeatKind::Seat, || SeatStatus::Available);
    table.seats[1].rotation = None;
    assert!(table.validate_radial().is_ok());
}

#[test]
fn radial_rotation_handles_zero_count() {
    assert!(radial_rotation(0, 0).abs() < f64::EPSILON);
    assert!((radial_rotation(6, 1) - 60.0).abs() < f64::EPSILON);
}

// =========================================================================
// Floor
// =========================================================================

fn flexible_floor(tables: Vec<TableGroup>) -> Floor {
    Floor {
        id: "f".into(),
        level: 1,
        name: "Hall".into(),
        layout: FloorLayout::Flexible(FlexibleLayout { tables, ..FlexibleLayout::default() }),
    }
}

#[test]
fn floor_seats_iterates_table_seats_in_order() {
    let floor = flexible_floor(vec![
        TableGroup::radial("f", "a", "A", Position::new(0.0, 0.0), 2, SeatKind::Seat, || SeatStatus::Available),
        TableGroup::radial("f", "b", "B", Position::new(0.0, 0.0), 3, SeatKind::Seat, || SeatStatus::Available),
    ]);
    let labels: Vec<&str> = floor.seats().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["A-1", "A-2", "B-1", "B-2", "B-3"]);
}

#[test]
fn floor_validate_rejects_duplicate_table_seat_ids() {
    let table = TableGroup::radial("f", "a", "A", Position::new(0.0, 0.0), 2, SeatKind::Seat, || SeatStatus::Available);
    let floor = flexible_floor(vec![table.clone(), table]);
    assert_eq!(floor.validate().unwrap_err(), LayoutError::DuplicateId("f-t-a-s-0".into()));
}

#[test]
fn floor_seat_mut_finds_grid_cell() {
    let mut floor = Floor {
        id: "f".into(),
        level: 1,
        name: "Grid".into(),
        layout: FloorLayout::Grid(GridLayout::blank("f", 2, 2).unwrap()),
    };
    floor.seat_mut("f-c-3").unwrap().status = SeatStatus::Occupied;
    assert_eq!(floor.seats().nth(3).unwrap().status, SeatStatus::Occupied);
    assert!(floor.seat_mut("missing").is_none());
}
