//! Winner lookup by year

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use wcdb_common::Winner;

use super::input;
use crate::error::{ApiError, ApiResult};
use crate::validators::{Validator, YearRule};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct WinnerResponse {
    pub year: i32,
    pub winner: String,
    pub host_country: String,
}

impl From<Winner> for WinnerResponse {
    fn from(w: Winner) -> Self {
        Self {
            year: w.year,
            winner: w.winner,
            host_country: w.host_country,
        }
    }
}

/// GET /api/winners/:year
pub async fn get_winner(
    State(state): State<AppState>,
    year: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<WinnerResponse>> {
    let input = YearRule.validate(&input::path_fields("year", year)?)?;

    let winner = state
        .repository
        .find_winner_by_year(input.year)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No World Cup winner found for year {}", input.year))
        })?;

    Ok(Json(winner.into()))
}

pub fn winner_routes() -> Router<AppState> {
    Router::new().route("/api/winners/:year", get(get_winner))
}
