//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON endpoints for the browsing, editor, booking, and suggestion flows under
//! one Axum router. Handlers translate HTTP to repository and service calls;
//! they hold the repository lock only as long as the call they wrap.

pub mod bookings;
pub mod libraries;
pub mod suggestions;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::state::AppState;
use crate::store::StoreError;

/// The full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/locations", get(libraries::list_locations).post(libraries::create_location))
        .route("/api/libraries", get(libraries::list_libraries).post(libraries::create_library))
        .route(
            "/api/libraries/{id}",
            get(libraries::get_library).patch(libraries::update_library),
        )
        .route("/api/libraries/{id}/floors", post(libraries::create_floor))
        .route(
            "/api/libraries/{id}/floors/{floor_id}",
            get(libraries::get_floor).put(libraries::save_floor),
        )
        .route("/api/libraries/{id}/floors/{floor_id}/paint", post(libraries::paint_cell))
        .route("/api/libraries/{id}/floors/{floor_id}/stroke", post(libraries::paint_stroke))
        .route("/api/libraries/{id}/available-seats", get(libraries::available_seats))
        .route("/api/libraries/{id}/bookings", post(bookings::request_booking))
        .route("/api/libraries/{id}/suggestions", post(suggestions::suggest_seats))
        .route("/api/bookings", get(bookings::list_bookings))
        .route("/api/bookings/{id}/approve", post(bookings::approve_booking))
        .route("/api/bookings/{id}/decline", post(bookings::decline_booking))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub(crate) fn store_error_to_status(err: StoreError) -> StatusCode {
    debug!(error = %err, "request rejected");
    match err {
        StoreError::LibraryNotFound(_)
        | StoreError::FloorNotFound { .. }
        | StoreError::SeatNotFound { .. }
        | StoreError::BookingNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::NotSeating { .. }
        | StoreError::SeatUnavailable { .. }
        | StoreError::BookingNotPending { .. }
        | StoreError::CellIdsChanged { .. } => StatusCode::CONFLICT,
        StoreError::InvalidLayout(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}
