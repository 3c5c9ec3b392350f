//! Seat suggestion route.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::routes::store_error_to_status;
use crate::services::suggestion::{self, StudentProfile, SuggestionOutcome};
use crate::state::AppState;

/// `POST /api/libraries/:id/suggestions`: ask the LLM for seats.
///
/// LLM failures still answer 200 with `success: false`; only an unknown
/// library is an HTTP error.
pub async fn suggest_seats(
    State(state): State<AppState>,
    Path(library_id): Path<String>,
    Json(profile): Json<StudentProfile>,
) -> Result<Json<SuggestionOutcome>, StatusCode> {
    suggestion::suggest_for_library(&state, &library_id, profile)
        .await
        .map(Json)
        .map_err(store_error_to_status)
}
