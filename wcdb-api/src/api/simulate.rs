//! Future winner simulation

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use wcdb_common::HISTORICAL_CUTOFF_YEAR;

use super::input;
use crate::error::{ApiError, ApiResult};
use crate::validators::{TournamentYearRule, Validator};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    pub year: i32,
    pub winner: String,
    pub simulated: bool,
}

/// POST /api/simulate with body `{"year": 2026}`
///
/// Answers 201 on every call; repeat calls return the stored result.
pub async fn simulate_winner(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SimulationResponse>)> {
    let input = TournamentYearRule.validate(&input::body_fields(body)?)?;

    // Checked before any storage access, whether or not the year has a row
    if input.year <= HISTORICAL_CUTOFF_YEAR {
        return Err(ApiError::Precondition(format!(
            "Simulation is only available for years after {}",
            HISTORICAL_CUTOFF_YEAR
        )));
    }

    let winner = state.simulator.simulate(input.year).await?;

    Ok((
        StatusCode::CREATED,
        Json(SimulationResponse {
            year: winner.year,
            winner: winner.winner,
            simulated: true,
        }),
    ))
}

pub fn simulate_routes() -> Router<AppState> {
    Router::new().route("/api/simulate", post(simulate_winner))
}
