use super::*;
use crate::layout::{GridLayout, SeatKind};
use crate::services::booking::TimeSlot;
use crate::state::test_helpers::{demo_repo, grid_row};

fn grid_cells<'a>(repo: &'a Repository, library_id: &str, floor_id: &str) -> &'a [Seat] {
    match &repo.floor(library_id, floor_id).unwrap().layout {
        FloorLayout::Grid(grid) => grid.cells(),
        FloorLayout::Flexible(_) => panic!("expected a grid floor"),
    }
}

// =========================================================================
// Locations and libraries
// =========================================================================

#[test]
fn demo_repo_has_seed_data() {
    let repo = demo_repo();
    assert_eq!(repo.locations().len(), 3);
    assert_eq!(repo.libraries().len(), 4);
    assert!(repo.bookings().is_empty());
}

#[test]
fn add_location_assigns_prefixed_id() {
    let mut repo = Repository::default();
    let loc = repo.add_location("East Campus");
    assert!(loc.id.starts_with("loc-"));
    assert_eq!(repo.locations(), &[loc]);
}

#[test]
fn add_library_defaults_image_and_has_no_floors() {
    let mut repo = Repository::default();
    let lib = repo.add_library(NewLibrary {
        name: "Annex".into(),
        address: "1 Side St".into(),
        location_id: "loc-1".into(),
        image_url: None,
    });
    assert!(lib.id.starts_with("lib-"));
    assert_eq!(lib.image_url, DEFAULT_IMAGE_URL);
    assert!(lib.floors.is_empty());
    assert_eq!(repo.find_library(&lib.id), Some(&lib));
}

#[test]
fn update_library_applies_only_present_fields() {
    let mut repo = demo_repo();
    let patch = LibraryPatch { name: Some("Renamed".into()), ..LibraryPatch::default() };
    let lib = repo.update_library("lib-2", patch).unwrap();
    assert_eq!(lib.name, "Renamed");
    assert_eq!(lib.address, "456 Innovation Dr, North Campus");
}

#[test]
fn update_library_unknown_is_none() {
    let mut repo = demo_repo();
    assert!(repo.update_library("lib-404", LibraryPatch::default()).is_none());
}

// =========================================================================
// Floors
// =========================================================================

#[test]
fn add_floor_appends_next_level_blank_grid() {
    let mut repo = demo_repo();
    let floor = repo
        .add_floor("lib-2", NewFloor { name: "Annex".into(), level: None, cols: 5, rows: 4 })
        .unwrap();
    assert_eq!(floor.id, "lib-2-f3");
    assert_eq!(floor.level, 3);
    assert_eq!(floor.seats().count(), 20);
}

#[test]
fn add_floor_rejects_zero_dimensions() {
    let mut repo = demo_repo();
    let err = repo
        .add_floor("lib-1", NewFloor { name: "Bad".into(), level: Some(9), cols: 0, rows: 4 })
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidLayout(LayoutError::ZeroDimension { .. })));
}

#[test]
fn add_floor_unknown_library() {
    let mut repo = demo_repo();
    let err = repo
        .add_floor("nope", NewFloor { name: "X".into(), level: None, cols: 2, rows: 2 })
        .unwrap_err();
    assert!(matches!(err, StoreError::LibraryNotFound(ref id) if id == "nope"));
}

#[test]
fn update_floor_path_id_wins_and_relabels() {
    let mut repo = demo_repo();
    let mut floor = repo.floor("lib-1", "lib-1-f3").unwrap().clone();
    floor.id = "ignored".into();
    floor.name = "Edited".into();
    if let FloorLayout::Grid(grid) = &mut floor.layout {
        grid.cells_mut()[0].kind = SeatKind::Seat;
        grid.cells_mut()[2].kind = SeatKind::Seat;
        grid.cells_mut()[2].label = "stale".into();
    }

    let saved = repo.update_floor("lib-1", "lib-1-f3", floor).unwrap();

    assert_eq!(saved.id, "lib-1-f3");
    assert_eq!(saved.name, "Edited");
    let labels: Vec<&str> = grid_cells(&repo, "lib-1", "lib-1-f3")[..3].iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["S1", "", "S2"]);
}

#[test]
fn update_floor_rejects_changed_cell_ids() {
    let mut repo = demo_repo();
    let grid = grid_row(&[SeatKind::Seat, SeatKind::Space, SeatKind::Seat]);
    let floor = Floor { id: "lib-1-f3".into(), level: 3, name: "Resized".into(), layout: FloorLayout::Grid(grid) };

    let err = repo.update_floor("lib-1", "lib-1-f3", floor).unwrap_err();

    assert!(matches!(err, StoreError::CellIdsChanged { ref floor_id } if floor_id == "lib-1-f3"));
    assert_eq!(grid_cells(&repo, "lib-1", "lib-1-f3").len(), 96);
}

#[test]
fn update_floor_rejects_bad_radial_table() {
    let mut repo = demo_repo();
    let mut floor = repo.floor("lib-1", "lib-1-f2").unwrap().clone();
    if let FloorLayout::Flexible(flex) = &mut floor.layout {
        flex.tables[0].seats[1].rotation = Some(45.0);
    }
    let err = repo.update_floor("lib-1", "lib-1-f2", floor).unwrap_err();
    assert!(matches!(err, StoreError::InvalidLayout(LayoutError::RotationMismatch { .. })));
}

#[test]
fn update_floor_unknown_floor() {
    let mut repo = demo_repo();
    let floor = Floor {
        id: "x".into(),
        level: 1,
        name: "X".into(),
        layout: FloorLayout::Grid(GridLayout::blank("x", 1, 1).unwrap()),
    };
    let err = repo.update_floor("lib-1", "lib-1-f9", floor).unwrap_err();
    assert!(matches!(err, StoreError::FloorNotFound { .. }));
}

// =========================================================================
// Paint routing
// =========================================================================

#[test]
fn paint_updates_stored_floor() {
    let mut repo = demo_repo();
    let (outcome, floor) = repo.paint("lib-1", "lib-1-f3", "lib-1-f3-c-5", SeatKind::Seat).unwrap();
    assert_eq!(outcome, PaintOutcome::Painted { previous: SeatKind::Space });
    assert_eq!(floor.seats().nth(5).unwrap().label, "S1");
    assert_eq!(grid_cells(&repo, "lib-1", "lib-1-f3")[5].label, "S1");
}

#[test]
fn paint_unknown_cell_is_not_an_error() {
    let mut repo = demo_repo();
    let before = repo.floor("lib-1", "lib-1-f3").unwrap().clone();
    let (outcome, floor) = repo.paint("lib-1", "lib-1-f3", "ghost", SeatKind::Seat).unwrap();
    assert_eq!(outcome, PaintOutcome::UnknownCell);
    assert_eq!(floor, &before);
}

#[test]
fn paint_unknown_floor_is_error() {
    let mut repo = demo_repo();
    let err = repo.paint("lib-1", "lib-1-f7", "c-0", SeatKind::Seat).unwrap_err();
    assert!(matches!(err, StoreError::FloorNotFound { .. }));
}

#[test]
fn paint_stroke_on_flexible_floor_has_no_summary() {
    let mut repo = demo_repo();
    let (summary, _) = repo
        .paint_stroke("lib-1", "lib-1-f1", &["lib-1-f1-t-1-s-0".to_owned()], SeatKind::Wall)
        .unwrap();
    assert!(summary.is_none());
}

// =========================================================================
// Seats
// =========================================================================

#[test]
fn find_seat_reports_owning_floor() {
    let repo = demo_repo();
    let (floor_id, seat) = repo.find_seat("lib-1", "lib-1-f2-t-q1-s-0").unwrap();
    assert_eq!(floor_id, "lib-1-f2");
    assert_eq!(seat.label, "Q1-1");
    assert!(repo.find_seat("lib-2", "lib-1-f2-t-q1-s-0").is_none());
}

#[test]
fn update_seat_status_searches_all_floors() {
    let mut repo = demo_repo();
    assert!(repo.update_seat_status("lib-1", "lib-1-f2-t-q3-s-2", SeatStatus::Occupied));
    assert_eq!(repo.find_seat("lib-1", "lib-1-f2-t-q3-s-2").unwrap().1.status, SeatStatus::Occupied);
    assert!(!repo.update_seat_status("lib-1", "missing", SeatStatus::Occupied));
    assert!(!repo.update_seat_status("lib-404", "lib-1-f2-t-q3-s-2", SeatStatus::Occupied));
}

#[test]
fn available_labels_skip_taken_and_non_seating() {
    let mut repo = demo_repo();
    let before = repo.available_seat_labels("lib-3");
    assert_eq!(before.len(), 24);
    assert_eq!(before[0], "Q1-1");

    repo.update_seat_status("lib-3", "lib-3-f1-t-q1-s-0", SeatStatus::Booked);
    repo.paint("lib-3", "lib-3-f2", "lib-3-f2-c-0", SeatKind::Seat).unwrap();
    repo.paint("lib-3", "lib-3-f2", "lib-3-f2-c-1", SeatKind::Wall).unwrap();

    let after = repo.available_seat_labels("lib-3");
    assert_eq!(after.len(), 24);
    assert!(!after.contains(&"Q1-1".to_owned()));
    assert_eq!(after.last().map(String::as_str), Some("S1"));
}

#[test]
fn available_labels_unknown_library_is_empty() {
    assert!(demo_repo().available_seat_labels("nope").is_empty());
}

// =========================================================================
// Bookings
// =========================================================================

fn booking(status: BookingStatus) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        student: "ada".into(),
        library_id: "lib-1".into(),
        floor_id: "lib-1-f2".into(),
        seat_id: "lib-1-f2-t-q1-s-0".into(),
        seat_label: "Q1-1".into(),
        time_slot: TimeSlot::TwoHours,
        status,
    }
}

#[test]
fn bookings_with_status_filters_in_insertion_order() {
    let mut repo = Repository::default();
    let a = booking(BookingStatus::Pending);
    let b = booking(BookingStatus::Booked);
    let c = booking(BookingStatus::Pending);
    for bk in [&a, &b, &c] {
        repo.insert_booking(bk.clone());
    }

    assert_eq!(repo.bookings_with_status(None).len(), 3);
    assert_eq!(repo.bookings_with_status(Some(BookingStatus::Pending)), vec![a, c]);
    assert!(repo.bookings_with_status(Some(BookingStatus::Declined)).is_empty());
}

#[test]
fn booking_mut_finds_by_id() {
    let mut repo = Repository::default();
    let a = booking(BookingStatus::Pending);
    repo.insert_booking(a.clone());
    repo.booking_mut(a.id).unwrap().status = BookingStatus::Declined;
    assert_eq!(repo.bookings()[0].status, BookingStatus::Declined);
    assert!(repo.booking_mut(Uuid::new_v4()).is_none());
}
