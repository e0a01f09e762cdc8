use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use practica_core::models::professional::Professional;
use practica_core::models::shift::Shift;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfessionalInput {
    /// Omit to create a new professional; pass an existing id to replace it.
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub specialty: String,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct RenameInput {
    pub name: String,
}

pub async fn list_professionals(
    State(state): State<AppState>,
) -> Result<Json<Vec<Professional>>, ApiError> {
    Ok(Json(state.service.get_all_professionals().await?))
}

pub async fn upsert_professional(
    State(state): State<AppState>,
    Json(input): Json<ProfessionalInput>,
) -> Result<Json<Professional>, ApiError> {
    let professional = Professional {
        id: input.id.unwrap_or_else(Uuid::new_v4),
        name: input.name,
        specialty: input.specialty,
        is_active: input.is_active,
    };
    Ok(Json(state.service.upsert_professional(professional).await?))
}

pub async fn rename_professional(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<RenameInput>,
) -> Result<Json<Professional>, ApiError> {
    Ok(Json(state.service.rename_professional(id, &input.name).await?))
}

pub async fn list_professional_shifts(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Shift>>, ApiError> {
    Ok(Json(state.service.get_shifts_by_professional(id).await?))
}
