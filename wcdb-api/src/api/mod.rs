//! HTTP API handlers for wcdb-api
//!
//! Each endpoint names the request part its validator reads:
//! - `GET /api/winners/:year` validates the path
//! - `GET /api/matches` validates the query string
//! - `POST /api/simulate` validates the JSON body

pub mod fallback;
pub mod health;
pub mod input;
pub mod matches;
pub mod simulate;
pub mod winners;

pub use fallback::route_not_found;
pub use health::health_routes;
pub use matches::match_routes;
pub use simulate::simulate_routes;
pub use winners::winner_routes;
