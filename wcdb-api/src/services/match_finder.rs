//! Head-to-head match lookup

use std::sync::Arc;

use tracing::debug;
use wcdb_common::{Match, Repository, Result};

/// Finds every recorded match between two teams
#[derive(Clone)]
pub struct MatchFinder {
    repository: Arc<dyn Repository>,
}

impl MatchFinder {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Matches between `team_a` and `team_b` in either order, ignoring case, oldest first.
    ///
    /// Teams that never met give an empty list, not an error.
    pub async fn find(&self, team_a: &str, team_b: &str) -> Result<Vec<Match>> {
        let matches = self.repository.find_matches_between(team_a, team_b).await?;
        debug!(team_a, team_b, count = matches.len(), "Head-to-head lookup");
        Ok(matches)
    }
}
