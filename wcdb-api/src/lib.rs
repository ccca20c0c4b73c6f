//! wcdb-api library - World Cup history HTTP service
//!
//! Winner lookup by year, head-to-head match history, and simulated winners
//! for future tournaments.

use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::Level;
use wcdb_common::Repository;

pub mod api;
pub mod error;
pub mod logging;
pub mod services;
pub mod validators;

use services::{MatchFinder, Selector, UniformSelector, WinnerSimulator};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn Repository>,
    pub finder: MatchFinder,
    pub simulator: WinnerSimulator,
}

impl AppState {
    /// State with a thread-local random draw for simulations
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self::with_selector(repository, Arc::new(UniformSelector))
    }

    pub fn with_selector(repository: Arc<dyn Repository>, selector: Arc<dyn Selector>) -> Self {
        Self {
            finder: MatchFinder::new(repository.clone()),
            simulator: WinnerSimulator::new(repository.clone(), selector),
            repository,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::winner_routes())
        .merge(api::match_routes())
        .merge(api::simulate_routes())
        .merge(api::health_routes())
        .fallback(api::route_not_found)
        // Span at INFO so errors logged inside a request carry its method and URI
        .layer(
            TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
