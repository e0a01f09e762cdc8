use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use practica_core::models::reassignment::ReassignmentRecord;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_reassignments(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReassignmentRecord>>, ApiError> {
    Ok(Json(state.service.get_reassignment_history(None).await?))
}

pub async fn shift_reassignments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReassignmentRecord>>, ApiError> {
    state.service.get_shift(id).await?;
    Ok(Json(state.service.get_reassignment_history(Some(id)).await?))
}
