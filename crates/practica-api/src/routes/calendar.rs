use axum::Json;
use axum::extract::{Path, State};

use practica_core::models::calendar::MonthlyShiftView;

use crate::error::ApiError;
use crate::state::AppState;

/// `month` is zero-based, as everywhere else in the API.
pub async fn monthly_view(
    State(state): State<AppState>,
    Path((year, month)): Path<(i16, i8)>,
) -> Result<Json<MonthlyShiftView>, ApiError> {
    Ok(Json(state.service.create_monthly_shift_view(month, year).await?))
}
