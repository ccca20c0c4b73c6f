//! Head-to-head match lookup

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use wcdb_common::Match;

use super::input;
use crate::error::ApiResult;
use crate::validators::{TeamPairRule, Validator};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub matches: Vec<Match>,
    pub count: usize,
}

/// GET /api/matches?team1=&team2=
///
/// Teams that never met give 200 with an empty list.
pub async fn get_matches(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<MatchesResponse>> {
    let pair = TeamPairRule.validate(&input::query_fields(query)?)?;

    let matches = state.finder.find(&pair.team1, &pair.team2).await?;

    Ok(Json(MatchesResponse {
        count: matches.len(),
        matches,
    }))
}

pub fn match_routes() -> Router<AppState> {
    Router::new().route("/api/matches", get(get_matches))
}
