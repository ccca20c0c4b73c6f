//! Record store abstraction
//!
//! Business logic talks to storage only through this trait, so the SQLite store and
//! the in-memory store used by tests are interchangeable.

use async_trait::async_trait;

use crate::db::models::{Match, Winner};
use crate::{Error, Result};

/// Durable store for winners and matches
#[async_trait]
pub trait Repository: Send + Sync {
    /// Winner row for `year`, if any
    async fn find_winner_by_year(&self, year: i32) -> Result<Option<Winner>>;

    /// All winners with `year <= max_year`, ascending by year
    async fn find_winners_up_to(&self, max_year: i32) -> Result<Vec<Winner>>;

    /// Insert a new winner
    ///
    /// # Errors
    /// * `Error::Duplicate` if a winner for the same year already exists. The store's
    ///   uniqueness constraint decides; callers must not rely on a prior lookup.
    async fn create_winner(&self, winner: &Winner) -> Result<Winner>;

    /// Matches played between the two teams in either order, ignoring case.
    /// Ordered by date, ties in insertion order.
    async fn find_matches_between(&self, team_a: &str, team_b: &str) -> Result<Vec<Match>>;

    /// Insert a match unless one with the same (year, date, team1, team2) exists.
    /// Returns true when a row was inserted.
    async fn insert_match_if_absent(&self, record: &Match) -> Result<bool>;

    async fn count_winners(&self) -> Result<i64>;

    async fn count_matches(&self) -> Result<i64>;

    /// Delete every winner and match
    async fn clear(&self) -> Result<()>;

    /// Insert a winner unless its year is already taken. Returns true when inserted.
    async fn insert_winner_if_absent(&self, winner: &Winner) -> Result<bool> {
        match self.create_winner(winner).await {
            Ok(_) => Ok(true),
            Err(Error::Duplicate(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
