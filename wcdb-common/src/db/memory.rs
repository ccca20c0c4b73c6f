//! In-memory repository
//!
//! Same contract as the SQLite store, including the per-year uniqueness of winners.
//! Used by unit tests and anywhere a throwaway store is enough.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::db::models::{Match, Winner};
use crate::db::repository::Repository;
use crate::{Error, Result};

#[derive(Default)]
struct Tables {
    winners: Vec<Winner>,
    matches: Vec<Match>,
    next_match_id: i64,
}

/// Repository held entirely in process memory
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given winners
    pub fn with_winners(winners: impl IntoIterator<Item = Winner>) -> Self {
        let tables = Tables {
            winners: winners.into_iter().collect(),
            ..Tables::default()
        };
        Self {
            tables: RwLock::new(tables),
        }
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn find_winner_by_year(&self, year: i32) -> Result<Option<Winner>> {
        let tables = self.tables.read().await;
        Ok(tables.winners.iter().find(|w| w.year == year).cloned())
    }

    async fn find_winners_up_to(&self, max_year: i32) -> Result<Vec<Winner>> {
        let tables = self.tables.read().await;
        let mut winners: Vec<Winner> = tables
            .winners
            .iter()
            .filter(|w| w.year <= max_year)
            .cloned()
            .collect();
        winners.sort_by_key(|w| w.year);
        Ok(winners)
    }

    async fn create_winner(&self, winner: &Winner) -> Result<Winner> {
        winner.validate()?;

        // Check and insert under one write lock, mirroring the UNIQUE(year) constraint
        let mut tables = self.tables.write().await;
        if tables.winners.iter().any(|w| w.year == winner.year) {
            return Err(Error::Duplicate(format!("winner for year {}", winner.year)));
        }
        tables.winners.push(winner.clone());
        Ok(winner.clone())
    }

    async fn find_matches_between(&self, team_a: &str, team_b: &str) -> Result<Vec<Match>> {
        let tables = self.tables.read().await;
        let mut found: Vec<Match> = tables
            .matches
            .iter()
            .filter(|m| m.is_between(team_a, team_b))
            .cloned()
            .collect();
        // Stable sort keeps insertion order for same-day matches
        found.sort_by_key(|m| m.date);
        Ok(found)
    }

    async fn insert_match_if_absent(&self, record: &Match) -> Result<bool> {
        record.validate()?;

        let mut tables = self.tables.write().await;
        let exists = tables.matches.iter().any(|m| {
            m.year == record.year
                && m.date == record.date
                && m.team1 == record.team1
                && m.team2 == record.team2
        });
        if exists {
            return Ok(false);
        }

        tables.next_match_id += 1;
        let mut stored = record.clone();
        stored.id = Some(tables.next_match_id);
        tables.matches.push(stored);
        Ok(true)
    }

    async fn count_winners(&self) -> Result<i64> {
        Ok(self.tables.read().await.winners.len() as i64)
    }

    async fn count_matches(&self) -> Result<i64> {
        Ok(self.tables.read().await.matches.len() as i64)
    }

    async fn clear(&self) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.winners.clear();
        tables.matches.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_year_is_rejected() {
        let repo =
            InMemoryRepository::with_winners([Winner::new(2018, "France", "Russia").unwrap()]);
        let err = repo
            .create_winner(&Winner::simulated(2018, "Brazil").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_matches_sorted_by_date_with_stable_ties() {
        let repo = InMemoryRepository::new();
        let late =
            Match::new(2014, "Semi-final", date(2014, 7, 8), "Brazil", "Germany", 1, 7).unwrap();
        let early =
            Match::new(2002, "Final", date(2002, 6, 30), "Germany", "Brazil", 0, 2).unwrap();
        let same_day =
            Match::new(2002, "Replay", date(2002, 6, 30), "Brazil", "Germany", 1, 1).unwrap();
        for m in [&late, &early, &same_day] {
            repo.insert_match_if_absent(m).await.unwrap();
        }

        let found = repo.find_matches_between("brazil", "GERMANY").await.unwrap();
        let stages: Vec<&str> = found.iter().map(|m| m.stage.as_str()).collect();
        assert_eq!(stages, vec!["Final", "Replay", "Semi-final"]);
        assert_eq!(found[0].id, Some(2));
    }

    #[tokio::test]
    async fn test_insert_match_if_absent_dedupes() {
        let repo = InMemoryRepository::new();
        let m = Match::new(2022, "Final", date(2022, 12, 18), "Argentina", "France", 3, 3).unwrap();
        assert!(repo.insert_match_if_absent(&m).await.unwrap());
        assert!(!repo.insert_match_if_absent(&m).await.unwrap());
        assert_eq!(repo.count_matches().await.unwrap(), 1);
    }
}
