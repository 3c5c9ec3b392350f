//! Demo data generators for locations, libraries, and floors.
//!
//! Seat statuses come from a [`StatusSource`]: a seeded or OS-seeded RNG for
//! demo runs, or a fixed status so tests see a known starting state.

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    ElementKind, FlexibleLayout, Floor, FloorLayout, GridLayout, LayoutError, Library, Location, OtherElement,
    Position, SeatKind, SeatStatus, Size, TableGroup, Zone,
};

/// Default grid dimensions for the per-library study floor.
pub const STUDY_GRID_COLS: u32 = 12;
pub const STUDY_GRID_ROWS: u32 = 8;

// =============================================================================
// STATUS SOURCE
// =============================================================================

pub enum StatusSource {
    Random(StdRng),
    Fixed(SeatStatus),
}

impl StatusSource {
    /// Reproducible random statuses.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Random(StdRng::seed_from_u64(seed))
    }

    /// Random statuses seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self::Random(StdRng::from_os_rng())
    }

    pub fn next_status(&mut self) -> SeatStatus {
        match self {
            Self::Random(rng) => SeatStatus::ALL[rng.random_range(0..SeatStatus::ALL.len())],
            Self::Fixed(status) => *status,
        }
    }
}

// =============================================================================
// FLOORS
// =============================================================================

/// Level 1: three zones, eleven six-seat tables, reception and stack areas.
pub fn main_hall_floor(floor_id: &str, statuses: &mut StatusSource) -> Floor {
    let tables = [
        // Left wing
        ("1", "L1", 10.0, 15.0),
        ("2", "L3", 10.0, 40.0),
        ("3", "L2", 10.0, 65.0),
        // Right wing
        ("5", "L2", 60.0, 15.0),
        ("6", "L1", 80.0, 15.0),
        ("7", "L6", 60.0, 40.0),
        ("8", "L6", 80.0, 40.0),
        ("9", "L4", 60.0, 65.0),
        ("10", "L1", 80.0, 65.0),
        ("11", "L5", 60.0, 90.0),
        ("12", "L5", 80.0, 90.0),
    ]
    .into_iter()
    .map(|(id, label, x, y)| {
        TableGroup::radial(floor_id, id, label, Position::new(x, y), 6, SeatKind::Seat, || statuses.next_status())
    })
    .collect();

    let zones = [
        ("zone-1", "Left Wing: Group Study", 5.0, 5.0),
        ("zone-2", "Rear Section: Reference Hall", 55.0, 5.0),
        ("zone-3", "Middle Spine", 38.0, 48.0),
    ]
    .into_iter()
    .map(|(id, label, x, y)| Zone { id: id.into(), label: label.into(), position: Position::new(x, y) })
    .collect();

    let elements = [
        ("el-1", "MAIN ENTRANCE", ElementKind::Reception, 38.0, 30.0, 150.0, 30.0),
        ("el-2", "BAG STORAGE", ElementKind::Storage, 38.0, 35.0, 100.0, 30.0),
        ("el-3", "RECEPTION", ElementKind::Reception, 48.0, 35.0, 80.0, 30.0),
        ("el-4", "STACK AREA I", ElementKind::Stack, 38.0, 55.0, 120.0, 25.0),
        ("el-5", "STACK AREA I", ElementKind::Stack, 38.0, 62.0, 120.0, 25.0),
        ("el-6", "STACK AREA I", ElementKind::Stack, 38.0, 69.0, 120.0, 25.0),
    ]
    .into_iter()
    .map(|(id, label, kind, x, y, w, h)| OtherElement {
        id: id.into(),
        label: label.into(),
        kind,
        position: Position::new(x, y),
        size: Size { w, h },
    })
    .collect();

    Floor {
        id: floor_id.to_owned(),
        level: 1,
        name: "First Floor - Main Hall".into(),
        layout: FloorLayout::Flexible(FlexibleLayout { zones, tables, elements }),
    }
}

/// Level 2: six four-seat group tables.
pub fn quiet_zone_floor(floor_id: &str, statuses: &mut StatusSource) -> Floor {
    let tables = [
        ("q1", "Q1", 20.0, 20.0),
        ("q2", "Q2", 50.0, 20.0),
        ("q3", "Q3", 80.0, 20.0),
        ("q4", "Q4", 20.0, 60.0),
        ("q5", "Q5", 50.0, 60.0),
        ("q6", "Q6", 80.0, 60.0),
    ]
    .into_iter()
    .map(|(id, label, x, y)| {
        TableGroup::radial(floor_id, id, label, Position::new(x, y), 4, SeatKind::GroupSeat, || {
            statuses.next_status()
        })
    })
    .collect();

    Floor {
        id: floor_id.to_owned(),
        level: 2,
        name: "Second Floor - Quiet Zone".into(),
        layout: FloorLayout::Flexible(FlexibleLayout { tables, ..FlexibleLayout::default() }),
    }
}

/// A blank grid floor for the layout editor.
///
/// # Errors
///
/// Returns a [`LayoutError`] if the dimensions are zero or too large.
pub fn study_grid_floor(floor_id: &str, level: i32, name: &str, cols: u32, rows: u32) -> Result<Floor, LayoutError> {
    Ok(Floor {
        id: floor_id.to_owned(),
        level,
        name: name.to_owned(),
        layout: FloorLayout::Grid(GridLayout::blank(floor_id, cols, rows)?),
    })
}

// =============================================================================
// LIBRARIES
// =============================================================================

#[must_use]
pub fn demo_locations() -> Vec<Location> {
    [("loc-1", "Downtown Campus"), ("loc-2", "North Campus"), ("loc-3", "Westwood Campus")]
        .into_iter()
        .map(|(id, name)| Location { id: id.into(), name: name.into() })
        .collect()
}

/// The four demo libraries, each with its flexible floors plus a study grid.
///
/// # Errors
///
/// Returns a [`LayoutError`] only if the study grid constants are invalid.
pub fn demo_libraries(statuses: &mut StatusSource) -> Result<Vec<Library>, LayoutError> {
    let mut libraries = vec![
        library(
            "lib-1",
            "Main Research Library",
            "loc-1",
            "123 University Ave, Downtown",
            vec![main_hall_floor("lib-1-f1", statuses), quiet_zone_floor("lib-1-f2", statuses)],
        ),
        library(
            "lib-2",
            "Science & Engineering Library",
            "loc-2",
            "456 Innovation Dr, North Campus",
            vec![main_hall_floor("lib-2-f1", statuses)],
        ),
        library(
            "lib-3",
            "Arts & Humanities Library",
            "loc-1",
            "789 Culture St, Downtown",
            vec![quiet_zone_floor("lib-3-f1", statuses)],
        ),
        library(
            "lib-4",
            "Westwood Medical Library",
            "loc-3",
            "101 Health Sci Pkwy, Westwood",
            vec![main_hall_floor("lib-4-f1", statuses), quiet_zone_floor("lib-4-f2", statuses)],
        ),
    ];

    for lib in &mut libraries {
        let level = lib.floors.iter().map(|f| f.level).max().unwrap_or(0) + 1;
        let floor_id = format!("{}-f{}", lib.id, lib.floors.len() + 1);
        lib.floors
            .push(study_grid_floor(&floor_id, level, "Study Commons", STUDY_GRID_COLS, STUDY_GRID_ROWS)?);
    }

    Ok(libraries)
}

fn library(id: &str, name: &str, location_id: &str, address: &str, floors: Vec<Floor>) -> Library {
    let seed = id.replace('-', "");
    Library {
        id: id.into(),
        name: name.into(),
        location_id: location_id.into(),
        address: address.into(),
        image_url: format!("https://picsum.photos/seed/{seed}/600/400"),
        floors,
    }
}
