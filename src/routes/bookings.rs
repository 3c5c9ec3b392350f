//! Booking request and admin approval routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::routes::store_error_to_status;
use crate::services::booking::{self, Booking, BookingRequest, BookingStatus};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct BookingQuery {
    pub status: Option<BookingStatus>,
}

/// `POST /api/libraries/:id/bookings`: request a seat.
pub async fn request_booking(
    State(state): State<AppState>,
    Path(library_id): Path<String>,
    Json(body): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), StatusCode> {
    if body.student.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut repo = state.repo.write().await;
    let booking = booking::request_booking(&mut repo, &library_id, body).map_err(store_error_to_status)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// `GET /api/bookings`: list bookings, optionally by status.
pub async fn list_bookings(State(state): State<AppState>, Query(query): Query<BookingQuery>) -> Json<Vec<Booking>> {
    let repo = state.repo.read().await;
    Json(booking::list_bookings(&repo, query.status))
}

/// `POST /api/bookings/:id/approve`
pub async fn approve_booking(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Booking>, StatusCode> {
    let mut repo = state.repo.write().await;
    booking::approve_booking(&mut repo, id)
        .map(Json)
        .map_err(store_error_to_status)
}

/// `POST /api/bookings/:id/decline`
pub async fn decline_booking(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Booking>, StatusCode> {
    let mut repo = state.repo.write().await;
    booking::decline_booking(&mut repo, id)
        .map(Json)
        .map_err(store_error_to_status)
}
