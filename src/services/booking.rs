//! Seat booking requests and their approve/decline transitions.
//!
//! DESIGN
//! ======
//! A request moves an `Available` seat to `Pending` and records a `Pending`
//! booking. An admin then approves (seat and booking become `Booked`) or
//! declines (seat returns to `Available`, booking becomes `Declined`). All
//! functions take `&mut Repository`; the HTTP layer holds the write lock for
//! the whole transition so two requests cannot claim the same seat.

#[cfg(test)]
#[path = "booking_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::layout::SeatStatus;
use crate::store::{Repository, StoreError};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "1-hour")]
    OneHour,
    #[serde(rename = "2-hours")]
    TwoHours,
    #[serde(rename = "4-hours")]
    FourHours,
    #[serde(rename = "all-day")]
    AllDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Booked,
    Declined,
}

impl BookingStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Booked => "Booked",
            Self::Declined => "Declined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub student: String,
    pub library_id: String,
    pub floor_id: String,
    pub seat_id: String,
    pub seat_label: String,
    pub time_slot: TimeSlot,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub student: String,
    pub seat_id: String,
    pub time_slot: TimeSlot,
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Request a seat. The seat must be bookable and `Available`.
///
/// # Errors
///
/// Returns `LibraryNotFound`, `SeatNotFound`, `NotSeating`, or `SeatUnavailable`.
pub fn request_booking(repo: &mut Repository, library_id: &str, request: BookingRequest) -> Result<Booking, StoreError> {
    if repo.find_library(library_id).is_none() {
        return Err(StoreError::LibraryNotFound(library_id.to_owned()));
    }
    let (floor_id, seat) = repo
        .find_seat(library_id, &request.seat_id)
        .ok_or_else(|| StoreError::SeatNotFound { library_id: library_id.to_owned(), seat_id: request.seat_id.clone() })?;

    if !seat.kind.is_seating() {
        return Err(StoreError::NotSeating { seat_id: seat.id.clone(), kind: seat.kind.as_str() });
    }
    if seat.status != SeatStatus::Available {
        return Err(StoreError::SeatUnavailable { seat_id: seat.id.clone(), status: seat.status.as_str() });
    }

    let booking = Booking {
        id: Uuid::new_v4(),
        student: request.student,
        library_id: library_id.to_owned(),
        floor_id: floor_id.to_owned(),
        seat_id: seat.id.clone(),
        seat_label: seat.label.clone(),
        time_slot: request.time_slot,
        status: BookingStatus::Pending,
    };

    repo.update_seat_status(library_id, &booking.seat_id, SeatStatus::Pending);
    repo.insert_booking(booking.clone());
    info!(
        booking_id = %booking.id,
        %library_id,
        seat = %booking.seat_label,
        time_slot = ?booking.time_slot,
        "booking requested"
    );
    Ok(booking)
}

/// Approve a pending booking: seat and booking become `Booked`.
///
/// # Errors
///
/// Returns `BookingNotFound` or `BookingNotPending`.
pub fn approve_booking(repo: &mut Repository, booking_id: Uuid) -> Result<Booking, StoreError> {
    resolve(repo, booking_id, BookingStatus::Booked, SeatStatus::Booked)
}

/// Decline a pending booking: the seat is released back to `Available`.
///
/// # Errors
///
/// Returns `BookingNotFound` or `BookingNotPending`.
pub fn decline_booking(repo: &mut Repository, booking_id: Uuid) -> Result<Booking, StoreError> {
    resolve(repo, booking_id, BookingStatus::Declined, SeatStatus::Available)
}

/// All bookings, or only those with `status`, oldest first.
#[must_use]
pub fn list_bookings(repo: &Repository, status: Option<BookingStatus>) -> Vec<Booking> {
    repo.bookings_with_status(status)
}

fn resolve(
    repo: &mut Repository,
    booking_id: Uuid,
    booking_status: BookingStatus,
    seat_status: SeatStatus,
) -> Result<Booking, StoreError> {
    let booking = repo
        .booking_mut(booking_id)
        .ok_or(StoreError::BookingNotFound(booking_id))?;
    if booking.status != BookingStatus::Pending {
        return Err(StoreError::BookingNotPending { id: booking_id, status: booking.status.as_str() });
    }
    booking.status = booking_status;
    let booking = booking.clone();

    // The seat may have been repainted or saved away since the request; the
    // booking still resolves, but only a seating cell takes the new status.
    let seating = repo
        .find_seat(&booking.library_id, &booking.seat_id)
        .map(|(_, seat)| seat.kind.is_seating());
    match seating {
        Some(true) => {
            repo.update_seat_status(&booking.library_id, &booking.seat_id, seat_status);
        }
        Some(false) => info!(booking_id = %booking.id, seat_id = %booking.seat_id, "booked seat is no longer seating"),
        None => info!(booking_id = %booking.id, seat_id = %booking.seat_id, "booked seat no longer exists"),
    }
    info!(booking_id = %booking.id, status = booking.status.as_str(), "booking resolved");
    Ok(booking)
}
