//! In-memory repository of locations, libraries, floors, and bookings.
//!
//! DESIGN
//! ======
//! `Repository` is a plain owned value, built once at startup from the demo
//! seed and handed to the HTTP layer inside `AppState` behind a single
//! `RwLock`. Nothing here is global. Every operation is synchronous; callers
//! that need read-modify-write atomicity hold the write guard for the whole
//! operation.
//!
//! ERROR HANDLING
//! ==============
//! Lookups return `Option`, matching "not found is not exceptional". Only
//! operations that must name what went wrong (floor saves, paint routing,
//! booking transitions) return `StoreError`. An unknown *cell* id on paint is
//! still a silent no-op, reported through `PaintOutcome`.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::layout::paint::{self, PaintOutcome, StrokeSummary};
use crate::layout::seed::{self, StatusSource};
use crate::layout::{Floor, FloorLayout, LayoutError, Library, Location, Seat, SeatKind, SeatStatus};
use crate::services::booking::{Booking, BookingStatus};

const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/seed/newlib/600/400";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("library not found: {0}")]
    LibraryNotFound(String),
    #[error("floor not found: {library_id}/{floor_id}")]
    FloorNotFound { library_id: String, floor_id: String },
    #[error("seat not found: {library_id}/{seat_id}")]
    SeatNotFound { library_id: String, seat_id: String },
    #[error("seat {seat_id} is not bookable ({kind})")]
    NotSeating { seat_id: String, kind: &'static str },
    #[error("seat {seat_id} is {status}, not Available")]
    SeatUnavailable { seat_id: String, status: &'static str },
    #[error("booking not found: {0}")]
    BookingNotFound(Uuid),
    #[error("booking {id} is {status}, not Pending")]
    BookingNotPending { id: Uuid, status: &'static str },
    #[error("grid save for {floor_id} changes its cell ids")]
    CellIdsChanged { floor_id: String },
    #[error("invalid layout: {0}")]
    InvalidLayout(#[from] LayoutError),
}

// =============================================================================
// INPUT TYPES
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NewLibrary {
    pub name: String,
    pub address: String,
    pub location_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial library update. Only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub location_id: Option<String>,
    pub image_url: Option<String>,
}

/// A new blank grid floor.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFloor {
    pub name: String,
    /// Defaults to one above the current top floor.
    #[serde(default)]
    pub level: Option<i32>,
    pub cols: u32,
    pub rows: u32,
}

// =============================================================================
// REPOSITORY
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Repository {
    libraries: Vec<Library>,
    locations: Vec<Location>,
    bookings: Vec<Booking>,
}

impl Repository {
    #[must_use]
    pub fn new(libraries: Vec<Library>, locations: Vec<Location>) -> Self {
        Self { libraries, locations, bookings: Vec::new() }
    }

    /// Repository seeded with the demo locations and libraries.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if a generated floor is invalid.
    pub fn demo(statuses: &mut StatusSource) -> Result<Self, LayoutError> {
        Ok(Self::new(seed::demo_libraries(statuses)?, seed::demo_locations()))
    }

    // -------------------------------------------------------------------------
    // Locations
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn add_location(&mut self, name: &str) -> Location {
        let location = Location { id: format!("loc-{}", Uuid::new_v4()), name: name.to_owned() };
        info!(location_id = %location.id, name, "location added");
        self.locations.push(location.clone());
        location
    }

    // -------------------------------------------------------------------------
    // Libraries
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    pub fn add_library(&mut self, new: NewLibrary) -> Library {
        let library = Library {
            id: format!("lib-{}", Uuid::new_v4()),
            name: new.name,
            location_id: new.location_id,
            address: new.address,
            image_url: new.image_url.unwrap_or_else(|| DEFAULT_IMAGE_URL.to_owned()),
            floors: Vec::new(),
        };
        info!(library_id = %library.id, name = %library.name, "library added");
        self.libraries.push(library.clone());
        library
    }

    #[must_use]
    pub fn find_library(&self, id: &str) -> Option<&Library> {
        self.libraries.iter().find(|l| l.id == id)
    }

    fn library_mut(&mut self, id: &str) -> Result<&mut Library, StoreError> {
        self.libraries
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::LibraryNotFound(id.to_owned()))
    }

    /// Apply a partial update. Returns `None` if no such library.
    pub fn update_library(&mut self, id: &str, patch: LibraryPatch) -> Option<&Library> {
        let library = self.libraries.iter_mut().find(|l| l.id == id)?;
        if let Some(name) = patch.name {
            library.name = name;
        }
        if let Some(address) = patch.address {
            library.address = address;
        }
        if let Some(location_id) = patch.location_id {
            library.location_id = location_id;
        }
        if let Some(image_url) = patch.image_url {
            library.image_url = image_url;
        }
        info!(library_id = %id, "library updated");
        Some(library)
    }

    // -------------------------------------------------------------------------
    // Floors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn floor(&self, library_id: &str, floor_id: &str) -> Option<&Floor> {
        self.find_library(library_id)?
            .floors
            .iter()
            .find(|f| f.id == floor_id)
    }

    fn floor_mut(&mut self, library_id: &str, floor_id: &str) -> Result<&mut Floor, StoreError> {
        self.library_mut(library_id)?
            .floors
            .iter_mut()
            .find(|f| f.id == floor_id)
            .ok_or_else(|| StoreError::FloorNotFound { library_id: library_id.to_owned(), floor_id: floor_id.to_owned() })
    }

    /// Replace a floor wholesale (the editor's "save layout").
    ///
    /// The path's `floor_id` wins over any id in the body. Grid labels are
    /// re-derived so a saved floor satisfies the same labeling as a painted one.
    /// Cell ids are immutable: a grid saved over a grid must carry the same id
    /// set, so resizing means adding a new floor.
    ///
    /// # Errors
    ///
    /// Returns `LibraryNotFound`, `FloorNotFound`, `CellIdsChanged`, or
    /// `InvalidLayout`.
    pub fn update_floor(&mut self, library_id: &str, floor_id: &str, mut floor: Floor) -> Result<&Floor, StoreError> {
        floor.id = floor_id.to_owned();
        floor.validate()?;
        if let FloorLayout::Grid(grid) = &mut floor.layout {
            paint::relabel(grid.cells_mut());
        }

        let slot = self.floor_mut(library_id, floor_id)?;
        if let (FloorLayout::Grid(current), FloorLayout::Grid(saved)) = (&slot.layout, &floor.layout)
            && !same_cell_ids(current.cells(), saved.cells())
        {
            return Err(StoreError::CellIdsChanged { floor_id: floor_id.to_owned() });
        }
        *slot = floor;
        info!(%library_id, %floor_id, seats = slot.seats().count(), "floor layout saved");
        Ok(slot)
    }

    /// Append a blank grid floor to a library.
    ///
    /// # Errors
    ///
    /// Returns `LibraryNotFound` or `InvalidLayout` for bad dimensions.
    pub fn add_floor(&mut self, library_id: &str, new: NewFloor) -> Result<&Floor, StoreError> {
        let library = self.library_mut(library_id)?;

        let mut n = library.floors.len() + 1;
        let mut floor_id = format!("{library_id}-f{n}");
        while library.floors.iter().any(|f| f.id == floor_id) {
            n += 1;
            floor_id = format!("{library_id}-f{n}");
        }
        let level = new
            .level
            .unwrap_or_else(|| library.floors.iter().map(|f| f.level).max().unwrap_or(0) + 1);

        let floor = seed::study_grid_floor(&floor_id, level, &new.name, new.cols, new.rows)?;
        info!(%library_id, %floor_id, cols = new.cols, rows = new.rows, "floor added");
        library.floors.push(floor);
        library
            .floors
            .last()
            .ok_or_else(|| StoreError::FloorNotFound { library_id: library_id.to_owned(), floor_id })
    }

    /// Paint one cell of a grid floor.
    ///
    /// # Errors
    ///
    /// Returns `LibraryNotFound` or `FloorNotFound`. An unknown cell id is not an
    /// error; it comes back as [`PaintOutcome::UnknownCell`].
    pub fn paint(
        &mut self,
        library_id: &str,
        floor_id: &str,
        cell_id: &str,
        brush: SeatKind,
    ) -> Result<(PaintOutcome, &Floor), StoreError> {
        let floor = self.floor_mut(library_id, floor_id)?;
        let outcome = paint::paint_cell(floor, cell_id, brush);
        Ok((outcome, floor))
    }

    /// Paint a stroke of cells. `None` summary means the floor is not a grid.
    ///
    /// # Errors
    ///
    /// Returns `LibraryNotFound` or `FloorNotFound`.
    pub fn paint_stroke(
        &mut self,
        library_id: &str,
        floor_id: &str,
        cell_ids: &[String],
        brush: SeatKind,
    ) -> Result<(Option<StrokeSummary>, &Floor), StoreError> {
        let floor = self.floor_mut(library_id, floor_id)?;
        let summary = paint::paint_stroke(floor, cell_ids, brush);
        Ok((summary, floor))
    }

    // -------------------------------------------------------------------------
    // Seats
    // -------------------------------------------------------------------------

    /// Find a seat anywhere in a library. Returns the owning floor id too.
    #[must_use]
    pub fn find_seat(&self, library_id: &str, seat_id: &str) -> Option<(&str, &Seat)> {
        self.find_library(library_id)?
            .floors
            .iter()
            .find_map(|floor| floor.seats().find(|s| s.id == seat_id).map(|s| (floor.id.as_str(), s)))
    }

    /// Set a seat's status. First match across the library's floors wins.
    /// Returns `false` if the library or seat does not exist.
    pub fn update_seat_status(&mut self, library_id: &str, seat_id: &str, status: SeatStatus) -> bool {
        let Some(library) = self.libraries.iter_mut().find(|l| l.id == library_id) else {
            return false;
        };
        for floor in &mut library.floors {
            if let Some(seat) = floor.seat_mut(seat_id) {
                seat.status = status;
                return true;
            }
        }
        false
    }

    /// Labels of bookable, available seats across the library in floor order.
    #[must_use]
    pub fn available_seat_labels(&self, library_id: &str) -> Vec<String> {
        let Some(library) = self.find_library(library_id) else {
            return Vec::new();
        };
        library
            .floors
            .iter()
            .flat_map(Floor::seats)
            .filter(|s| s.kind.is_seating() && s.status == SeatStatus::Available && !s.label.is_empty())
            .map(|s| s.label.clone())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Bookings
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn insert_booking(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    pub fn booking_mut(&mut self, id: Uuid) -> Option<&mut Booking> {
        self.bookings.iter_mut().find(|b| b.id == id)
    }

    /// Bookings filtered by status, oldest first.
    #[must_use]
    pub fn bookings_with_status(&self, status: Option<BookingStatus>) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| status.is_none_or(|s| b.status == s))
            .cloned()
            .collect()
    }
}

fn same_cell_ids(current: &[Seat], saved: &[Seat]) -> bool {
    let mut current: Vec<&str> = current.iter().map(|c| c.id.as_str()).collect();
    let mut saved: Vec<&str> = saved.iter().map(|c| c.id.as_str()).collect();
    current.sort_unstable();
    saved.sort_unstable();
    current == saved
}
