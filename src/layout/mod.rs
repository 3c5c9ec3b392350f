//! Layout model: seats, floors, libraries, and the two floor representations.
//!
//! DESIGN
//! ======
//! A floor is either a uniform row-major grid of cells (the editor's canvas)
//! or a flexible layout of percentage-positioned zones, radial table groups,
//! and freeform elements. The two are an explicit tagged variant
//! (`FloorLayout`) so the paint engine and any renderer match exhaustively
//! instead of probing optional fields.
//!
//! Grid dimensions are checked on construction and on deserialization
//! (`GridLayout` goes through `RawGrid`), so a `GridLayout` value always
//! satisfies `cols * rows == cells.len()`.

pub mod paint;
pub mod seed;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Tolerance when comparing stored seat rotations against the radial spacing.
const ROTATION_EPSILON: f64 = 1e-6;

/// Upper bound on `cols * rows` for a single grid floor.
pub const MAX_GRID_CELLS: usize = 10_000;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("grid dimensions must be positive (cols {cols}, rows {rows})")]
    ZeroDimension { cols: u32, rows: u32 },
    #[error("grid {cols}x{rows} needs {expected} cells, got {actual}")]
    CellCountMismatch { cols: u32, rows: u32, expected: usize, actual: usize },
    #[error("grid {cols}x{rows} exceeds {max} cells")]
    TooLarge { cols: u32, rows: u32, max: usize },
    #[error("duplicate cell id: {0}")]
    DuplicateId(String),
    #[error("table {table}: seat {index} rotation {actual} does not match radial spacing {expected}")]
    RotationMismatch { table: String, index: usize, expected: f64, actual: f64 },
}

// =============================================================================
// SEATS
// =============================================================================

/// Booking state of a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatStatus {
    Available,
    Occupied,
    Booked,
    Pending,
}

impl SeatStatus {
    pub const ALL: [Self; 4] = [Self::Available, Self::Occupied, Self::Booked, Self::Pending];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Booked => "Booked",
            Self::Pending => "Pending",
        }
    }

    /// Parse the wire name (`"Available"`, `"Pending"`, ...), case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

/// What occupies a grid cell or table position. Doubles as the editor brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeatKind {
    Seat,
    GroupSeat,
    Space,
    Wall,
    Window,
    BookShelf,
    CoffeeStation,
    Entrance,
}

impl SeatKind {
    pub const ALL: [Self; 8] = [
        Self::Seat,
        Self::GroupSeat,
        Self::Space,
        Self::Wall,
        Self::Window,
        Self::BookShelf,
        Self::CoffeeStation,
        Self::Entrance,
    ];

    /// `true` for kinds a student can sit in and book.
    #[must_use]
    pub fn is_seating(self) -> bool {
        matches!(self, Self::Seat | Self::GroupSeat)
    }

    /// Label prefix for seating kinds: `S` for seats, `G` for group seats.
    #[must_use]
    pub fn label_prefix(self) -> Option<char> {
        match self {
            Self::Seat => Some('S'),
            Self::GroupSeat => Some('G'),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seat => "seat",
            Self::GroupSeat => "group-seat",
            Self::Space => "space",
            Self::Wall => "wall",
            Self::Window => "window",
            Self::BookShelf => "book-shelf",
            Self::CoffeeStation => "coffee-station",
            Self::Entrance => "entrance",
        }
    }
}

/// One grid cell or table position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    /// Unique within a floor; assigned at generation time and never changed.
    pub id: String,
    /// Display label. Empty for non-seating grid cells.
    pub label: String,
    pub status: SeatStatus,
    #[serde(rename = "type")]
    pub kind: SeatKind,
    /// Degrees around the owning table's center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl Seat {
    /// An empty grid cell.
    #[must_use]
    pub fn space(id: impl Into<String>) -> Self {
        Self { id: id.into(), label: String::new(), status: SeatStatus::Available, kind: SeatKind::Space, rotation: None }
    }
}

// =============================================================================
// GEOMETRY
// =============================================================================

/// Percentage-based position within the floor canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel size of a freeform element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

// =============================================================================
// GRID LAYOUT
// =============================================================================

/// Row-major grid of cells. `cols * rows == cells.len()` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct GridLayout {
    cols: u32,
    rows: u32,
    cells: Vec<Seat>,
}

#[derive(Deserialize)]
struct RawGrid {
    cols: u32,
    rows: u32,
    cells: Vec<Seat>,
}

impl TryFrom<RawGrid> for GridLayout {
    type Error = LayoutError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Self::new(raw.cols, raw.rows, raw.cells)
    }
}

impl GridLayout {
    /// Build a grid, checking dimensions and cell id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if a dimension is zero, the cell count does not
    /// match `cols * rows`, or two cells share an id.
    pub fn new(cols: u32, rows: u32, cells: Vec<Seat>) -> Result<Self, LayoutError> {
        check_grid(cols, rows, &cells)?;
        Ok(Self { cols, rows, cells })
    }

    /// A grid of `space` cells with ids `"{floor_id}-c-{index}"`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ZeroDimension`] if `cols` or `rows` is zero, or
    /// [`LayoutError::TooLarge`] past [`MAX_GRID_CELLS`].
    pub fn blank(floor_id: &str, cols: u32, rows: u32) -> Result<Self, LayoutError> {
        let count = cols as usize * rows as usize;
        if count > MAX_GRID_CELLS {
            return Err(LayoutError::TooLarge { cols, rows, max: MAX_GRID_CELLS });
        }
        let cells = (0..count)
            .map(|index| Seat::space(format!("{floor_id}-c-{index}")))
            .collect();
        Self::new(cols, rows, cells)
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn cells(&self) -> &[Seat] {
        &self.cells
    }

    /// Mutable access to the cells. A slice, so the length cannot change.
    pub fn cells_mut(&mut self) -> &mut [Seat] {
        &mut self.cells
    }
}

// =============================================================================
// FLEXIBLE LAYOUT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub label: String,
    pub position: Position,
}

/// A table with seats arranged radially around a percentage-positioned anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGroup {
    pub id: String,
    pub label: String,
    pub seats: Vec<Seat>,
    pub position: Position,
}

impl TableGroup {
    /// Build a table of `seat_count` seats with ids `"{floor_id}-t-{id}-s-{i}"`,
    /// labels `"{label}-{i+1}"`, and rotations `360 / seat_count * i`.
    pub fn radial(
        floor_id: &str,
        id: &str,
        label: &str,
        position: Position,
        seat_count: u32,
        kind: SeatKind,
        mut status: impl FnMut() -> SeatStatus,
    ) -> Self {
        let seats = (0..seat_count)
            .map(|i| Seat {
                id: format!("{floor_id}-t-{id}-s-{i}"),
                label: format!("{label}-{}", i + 1),
                status: status(),
                kind,
                rotation: Some(radial_rotation(seat_count, i)),
            })
            .collect();
        Self { id: format!("{floor_id}-t-{id}"), label: label.to_owned(), seats, position }
    }

    /// Check that seats which carry a rotation follow the radial spacing.
    ///
    /// Seats without a rotation are treated as hand-placed and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::RotationMismatch`] for the first seat off the spacing.
    pub fn validate_radial(&self) -> Result<(), LayoutError> {
        let Ok(count) = u32::try_from(self.seats.len()) else {
            return Ok(());
        };
        for (index, seat) in (0..count).zip(&self.seats) {
            let Some(actual) = seat.rotation else {
                continue;
            };
            let expected = radial_rotation(count, index);
            if (actual - expected).abs() > ROTATION_EPSILON {
                return Err(LayoutError::RotationMismatch {
                    table: self.id.clone(),
                    index: index as usize,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Rotation in degrees of seat `index` out of `count` evenly spaced seats.
#[must_use]
pub fn radial_rotation(count: u32, index: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    360.0 / f64::from(count) * f64::from(index)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Storage,
    Reception,
    Stack,
}

/// Freeform, non-bookable floor element (reception desk, stacks, storage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherElement {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub position: Position,
    pub size: Size,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlexibleLayout {
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub tables: Vec<TableGroup>,
    #[serde(default)]
    pub elements: Vec<OtherElement>,
}

// =============================================================================
// FLOORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FloorLayout {
    Grid(GridLayout),
    Flexible(FlexibleLayout),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,
    pub level: i32,
    pub name: String,
    pub layout: FloorLayout,
}

impl Floor {
    /// Every seat on the floor in scan order: grid cells row-major, or table
    /// seats table by table.
    pub fn seats(&self) -> Box<dyn Iterator<Item = &Seat> + '_> {
        match &self.layout {
            FloorLayout::Grid(grid) => Box::new(grid.cells.iter()),
            FloorLayout::Flexible(flex) => Box::new(flex.tables.iter().flat_map(|t| t.seats.iter())),
        }
    }

    pub fn seat_mut(&mut self, seat_id: &str) -> Option<&mut Seat> {
        match &mut self.layout {
            FloorLayout::Grid(grid) => grid.cells.iter_mut().find(|s| s.id == seat_id),
            FloorLayout::Flexible(flex) => flex
                .tables
                .iter_mut()
                .flat_map(|t| t.seats.iter_mut())
                .find(|s| s.id == seat_id),
        }
    }

    /// Validate whichever representation the floor holds.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayoutError`] found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        match &self.layout {
            FloorLayout::Grid(grid) => check_grid(grid.cols, grid.rows, &grid.cells),
            FloorLayout::Flexible(flex) => {
                for table in &flex.tables {
                    table.validate_radial()?;
                }
                ensure_unique_ids(self.seats())
            }
        }
    }
}

fn check_grid(cols: u32, rows: u32, cells: &[Seat]) -> Result<(), LayoutError> {
    if cols == 0 || rows == 0 {
        return Err(LayoutError::ZeroDimension { cols, rows });
    }
    let expected = cols as usize * rows as usize;
    if expected > MAX_GRID_CELLS {
        return Err(LayoutError::TooLarge { cols, rows, max: MAX_GRID_CELLS });
    }
    if cells.len() != expected {
        return Err(LayoutError::CellCountMismatch { cols, rows, expected, actual: cells.len() });
    }
    ensure_unique_ids(cells.iter())
}

fn ensure_unique_ids<'a>(seats: impl Iterator<Item = &'a Seat>) -> Result<(), LayoutError> {
    let mut seen = HashSet::new();
    for seat in seats {
        if !seen.insert(seat.id.as_str()) {
            return Err(LayoutError::DuplicateId(seat.id.clone()));
        }
    }
    Ok(())
}

// =============================================================================
// LIBRARIES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Library {
    pub id: String,
    pub name: String,
    /// Refers to a [`Location`] by id. Not checked.
    pub location_id: String,
    pub address: String,
    pub image_url: String,
    pub floors: Vec<Floor>,
}
