//! Location, library, floor, and layout-editor routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::paint::PaintOutcome;
use crate::layout::{Floor, FloorLayout, Library, Location, SeatKind};
use crate::routes::store_error_to_status;
use crate::state::AppState;
use crate::store::{LibraryPatch, NewFloor, NewLibrary};

#[derive(Deserialize)]
pub struct CreateLocationBody {
    pub name: String,
}

#[derive(Deserialize)]
pub struct LibraryQuery {
    pub location_id: Option<String>,
}

/// A floor as the editor saves it. The id comes from the path.
#[derive(Deserialize)]
pub struct SaveFloorBody {
    pub level: i32,
    pub name: String,
    pub layout: FloorLayout,
}

#[derive(Deserialize)]
pub struct PaintBody {
    pub cell_id: String,
    pub brush: SeatKind,
}

#[derive(Deserialize)]
pub struct StrokeBody {
    pub cell_ids: Vec<String>,
    pub brush: SeatKind,
}

#[derive(Serialize)]
pub struct PaintResponse {
    #[serde(flatten)]
    pub outcome: PaintOutcome,
    pub floor: Floor,
}

#[derive(Serialize)]
pub struct StrokeResponse {
    pub painted: usize,
    pub unknown: usize,
    pub floor: Floor,
}

// =============================================================================
// LOCATIONS
// =============================================================================

/// `GET /api/locations`: list locations.
pub async fn list_locations(State(state): State<AppState>) -> Json<Vec<Location>> {
    Json(state.repo.read().await.locations().to_vec())
}

/// `POST /api/locations`: add a location.
pub async fn create_location(
    State(state): State<AppState>,
    Json(body): Json<CreateLocationBody>,
) -> Result<(StatusCode, Json<Location>), StatusCode> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let location = state.repo.write().await.add_location(name);
    Ok((StatusCode::CREATED, Json(location)))
}

// =============================================================================
// LIBRARIES
// =============================================================================

/// `GET /api/libraries`: list libraries, optionally for one location.
pub async fn list_libraries(
    State(state): State<AppState>,
    Query(query): Query<LibraryQuery>,
) -> Json<Vec<Library>> {
    let repo = state.repo.read().await;
    let libraries = repo
        .libraries()
        .iter()
        .filter(|l| query.location_id.as_ref().is_none_or(|id| &l.location_id == id))
        .cloned()
        .collect();
    Json(libraries)
}

/// `POST /api/libraries`: add a library with no floors.
pub async fn create_library(
    State(state): State<AppState>,
    Json(body): Json<NewLibrary>,
) -> Result<(StatusCode, Json<Library>), StatusCode> {
    if body.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let library = state.repo.write().await.add_library(body);
    Ok((StatusCode::CREATED, Json(library)))
}

/// `GET /api/libraries/:id`: fetch one library with its floors.
pub async fn get_library(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Library>, StatusCode> {
    let repo = state.repo.read().await;
    repo.find_library(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `PATCH /api/libraries/:id`: partial update of library details.
pub async fn update_library(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<LibraryPatch>,
) -> Result<Json<Library>, StatusCode> {
    let mut repo = state.repo.write().await;
    repo.update_library(&id, patch)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// =============================================================================
// FLOORS
// =============================================================================

/// `POST /api/libraries/:id/floors`: append a blank grid floor.
pub async fn create_floor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<NewFloor>,
) -> Result<(StatusCode, Json<Floor>), StatusCode> {
    let mut repo = state.repo.write().await;
    let floor = repo.add_floor(&id, body).map_err(store_error_to_status)?;
    Ok((StatusCode::CREATED, Json(floor.clone())))
}

/// `GET /api/libraries/:id/floors/:floor_id`: fetch one floor.
pub async fn get_floor(
    State(state): State<AppState>,
    Path((id, floor_id)): Path<(String, String)>,
) -> Result<Json<Floor>, StatusCode> {
    let repo = state.repo.read().await;
    repo.floor(&id, &floor_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `PUT /api/libraries/:id/floors/:floor_id`: save an edited layout.
pub async fn save_floor(
    State(state): State<AppState>,
    Path((id, floor_id)): Path<(String, String)>,
    Json(body): Json<SaveFloorBody>,
) -> Result<Json<Floor>, StatusCode> {
    let floor = Floor { id: floor_id.clone(), level: body.level, name: body.name, layout: body.layout };
    let mut repo = state.repo.write().await;
    let saved = repo.update_floor(&id, &floor_id, floor).map_err(store_error_to_status)?;
    Ok(Json(saved.clone()))
}

/// `POST /api/libraries/:id/floors/:floor_id/paint`: paint one grid cell.
///
/// An unknown cell id is not an error: the response carries
/// `"outcome": "unknown_cell"` and the unchanged floor. Flexible floors have
/// nothing to paint and answer 409.
pub async fn paint_cell(
    State(state): State<AppState>,
    Path((id, floor_id)): Path<(String, String)>,
    Json(body): Json<PaintBody>,
) -> Result<Json<PaintResponse>, StatusCode> {
    let mut repo = state.repo.write().await;
    let (outcome, floor) = repo
        .paint(&id, &floor_id, &body.cell_id, body.brush)
        .map_err(store_error_to_status)?;

    match outcome {
        PaintOutcome::NotGrid => return Err(StatusCode::CONFLICT),
        PaintOutcome::UnknownCell => debug!(library_id = %id, %floor_id, cell_id = %body.cell_id, "paint: unknown cell"),
        PaintOutcome::Painted { .. } => {}
    }
    Ok(Json(PaintResponse { outcome, floor: floor.clone() }))
}

/// `POST /api/libraries/:id/floors/:floor_id/stroke`: paint a drag stroke.
pub async fn paint_stroke(
    State(state): State<AppState>,
    Path((id, floor_id)): Path<(String, String)>,
    Json(body): Json<StrokeBody>,
) -> Result<Json<StrokeResponse>, StatusCode> {
    let mut repo = state.repo.write().await;
    let (summary, floor) = repo
        .paint_stroke(&id, &floor_id, &body.cell_ids, body.brush)
        .map_err(store_error_to_status)?;
    let summary = summary.ok_or(StatusCode::CONFLICT)?;

    if summary.unknown > 0 {
        debug!(library_id = %id, %floor_id, unknown = summary.unknown, "stroke: unknown cells skipped");
    }
    Ok(Json(StrokeResponse { painted: summary.painted, unknown: summary.unknown, floor: floor.clone() }))
}

/// `GET /api/libraries/:id/available-seats`: labels a student could book now.
pub async fn available_seats(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>, StatusCode> {
    let repo = state.repo.read().await;
    if repo.find_library(&id).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(repo.available_seat_labels(&id)))
}
