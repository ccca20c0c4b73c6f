//! Winner simulation for future tournaments
//!
//! The first request for a year draws uniformly from historical winner rows and
//! stores the result; every later request for that year returns the stored row.
//! A nation that won twice appears twice in the draw.
//!
//! Concurrent first requests for the same year can both miss the lookup. The
//! store's per-year uniqueness settles the race: the losing insert fails with
//! `Error::Duplicate` and that caller returns the row that won.
//!
//! The simulator does not check that `year` is in the future. Callers that expose
//! it to clients enforce that.

use std::sync::Arc;

use tracing::{debug, info};
use wcdb_common::{Error, Repository, Winner, HISTORICAL_CUTOFF_YEAR};

use super::selection::Selector;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// No winner rows at or before the historical cutoff
    #[error("No historical winners found to simulate from")]
    NoHistoricalData,

    #[error(transparent)]
    Storage(#[from] Error),
}

#[derive(Clone)]
pub struct WinnerSimulator {
    repository: Arc<dyn Repository>,
    selector: Arc<dyn Selector>,
}

impl WinnerSimulator {
    pub fn new(repository: Arc<dyn Repository>, selector: Arc<dyn Selector>) -> Self {
        Self {
            repository,
            selector,
        }
    }

    /// Winner for `year`, simulating and storing one on first request
    pub async fn simulate(&self, year: i32) -> Result<Winner, SimulationError> {
        if let Some(existing) = self.repository.find_winner_by_year(year).await? {
            debug!(
                year,
                winner = %existing.winner,
                simulated = existing.is_simulated(),
                "Returning stored winner"
            );
            return Ok(existing);
        }

        let candidates = self
            .repository
            .find_winners_up_to(HISTORICAL_CUTOFF_YEAR)
            .await?;
        if candidates.is_empty() {
            return Err(SimulationError::NoHistoricalData);
        }

        let index = self.selector.pick(candidates.len());
        let drawn = candidates.get(index).ok_or_else(|| {
            Error::Internal(format!(
                "selector returned index {} for {} candidates",
                index,
                candidates.len()
            ))
        })?;

        let simulated = Winner::simulated(year, drawn.winner.clone())?;

        match self.repository.create_winner(&simulated).await {
            Ok(stored) => {
                info!(year, winner = %stored.winner, "Simulated winner stored");
                Ok(stored)
            }
            Err(Error::Duplicate(_)) => {
                debug!(year, "Lost simulation race, returning stored winner");
                self.repository
                    .find_winner_by_year(year)
                    .await?
                    .ok_or_else(|| {
                        Error::Internal(format!(
                            "winner for year {} rejected as duplicate but not found",
                            year
                        ))
                        .into()
                    })
            }
            Err(e) => Err(e.into()),
        }
    }
}
