use axum::Json;
use axum::extract::{Path, Query, State};
use jiff::civil::Date;
use serde::Deserialize;
use uuid::Uuid;

use practica_core::models::clock_time::ClockTime;
use practica_core::models::shift::{Shift, ShiftStatus};
use practica_core::models::time_slot::TimeSlot;
use practica_roster::reassign::ReassignmentOutcome;
use practica_roster::sample::SampleMode;

use crate::error::ApiError;
use crate::state::AppState;

/// A slot as the client sends it. Ids and durations are assigned server-side.
#[derive(Debug, Deserialize)]
pub struct SlotInput {
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

fn to_slots(input: &[SlotInput]) -> Result<Vec<TimeSlot>, ApiError> {
    input
        .iter()
        .map(|s| TimeSlot::new(s.start_time, s.end_time).map_err(ApiError::from))
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<i8>,
    pub year: Option<i16>,
}

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: ShiftStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReassignInput {
    pub new_professional_id: Uuid,
    pub reason: String,
    #[serde(default)]
    pub is_partial: bool,
    #[serde(default)]
    pub slot_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct AssignInput {
    pub professional_id: Uuid,
    pub dates: Vec<Date>,
    pub time_slots: Vec<SlotInput>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateInput {
    pub professional_id: Uuid,
    /// Zero-based.
    pub month: i8,
    pub year: i16,
    /// 0 = Sunday .. 6 = Saturday.
    pub work_days: Vec<i8>,
    pub time_slots: Vec<SlotInput>,
}

#[derive(Debug, Deserialize)]
pub struct SampleInput {
    pub month: i8,
    pub year: i16,
    #[serde(default)]
    pub skip_existing: bool,
}

pub async fn list_shifts(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<Shift>>, ApiError> {
    let shifts = match (query.month, query.year) {
        (Some(month), Some(year)) => state.service.get_shifts_by_month(month, year).await?,
        (None, None) => state.service.get_all_shifts().await?,
        _ => {
            return Err(ApiError::BadRequest(
                "month and year must be given together".to_string(),
            ));
        }
    };
    Ok(Json(shifts))
}

pub async fn get_shift(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Shift>, ApiError> {
    Ok(Json(state.service.get_shift(id).await?))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<StatusInput>,
) -> Result<Json<Shift>, ApiError> {
    let shift = state
        .service
        .update_shift_status(id, input.status, input.notes)
        .await?;
    Ok(Json(shift))
}

pub async fn reassign_shift(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ReassignInput>,
) -> Result<Json<ReassignmentOutcome>, ApiError> {
    let outcome = state
        .service
        .reassign_shift(
            id,
            input.new_professional_id,
            &input.reason,
            input.is_partial,
            &input.slot_ids,
        )
        .await?;
    Ok(Json(outcome))
}

pub async fn assign_shifts(
    State(state): State<AppState>,
    Json(input): Json<AssignInput>,
) -> Result<Json<Vec<Shift>>, ApiError> {
    let slots = to_slots(&input.time_slots)?;
    let created = state
        .service
        .assign_shifts(input.professional_id, &input.dates, &slots)
        .await?;
    Ok(Json(created))
}

pub async fn generate_shifts(
    State(state): State<AppState>,
    Json(input): Json<GenerateInput>,
) -> Result<Json<Vec<Shift>>, ApiError> {
    let slots = to_slots(&input.time_slots)?;
    let created = state
        .service
        .generate_monthly_shifts(
            input.professional_id,
            input.month,
            input.year,
            &input.work_days,
            &slots,
        )
        .await?;
    Ok(Json(created))
}

pub async fn generate_samples(
    State(state): State<AppState>,
    Json(input): Json<SampleInput>,
) -> Result<Json<Vec<Shift>>, ApiError> {
    let mode = if input.skip_existing {
        SampleMode::SkipExisting
    } else {
        SampleMode::Append
    };
    let created = state
        .service
        .generate_sample_shifts(input.month, input.year, mode)
        .await?;
    Ok(Json(created))
}
