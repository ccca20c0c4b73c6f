//! Historical data seeding
//!
//! Loads `winners.json` and `matches.json` from a data directory and inserts them
//! find-or-create style: winners keyed by year, matches by (year, date, team1, team2).
//! Running the seed twice leaves the database unchanged.

use std::path::Path;

use tracing::info;

use crate::db::models::{Match, Winner};
use crate::db::repository::Repository;
use crate::{Error, Result};

pub const WINNERS_FILE: &str = "winners.json";
pub const MATCHES_FILE: &str = "matches.json";

/// Parsed and validated seed files
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub winners: Vec<Winner>,
    pub matches: Vec<Match>,
}

/// Counts reported after a seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub winners_inserted: usize,
    pub matches_inserted: usize,
    pub total_winners: i64,
    pub total_matches: i64,
}

impl SeedData {
    /// Read both seed files from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let winners_path = dir.join(WINNERS_FILE);
        let matches_path = dir.join(MATCHES_FILE);

        let winners: Vec<Winner> = read_json(&winners_path, "Winners")?;
        let matches: Vec<Match> = read_json(&matches_path, "Matches")?;

        Self::from_records(winners, matches)
    }

    /// Validate records; the first invalid one fails the whole load
    pub fn from_records(winners: Vec<Winner>, matches: Vec<Match>) -> Result<Self> {
        for (i, w) in winners.iter().enumerate() {
            w.validate().map_err(|e| invalid_record(WINNERS_FILE, i, e))?;
        }
        for (i, m) in matches.iter().enumerate() {
            m.validate().map_err(|e| invalid_record(MATCHES_FILE, i, e))?;
        }

        Ok(Self { winners, matches })
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, label: &str) -> Result<T> {
    if !path.exists() {
        return Err(Error::NotFound(format!(
            "{} data file not found: {}",
            label,
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn invalid_record(file: &str, index: usize, err: Error) -> Error {
    Error::InvalidInput(format!("{} record #{}: {}", file, index + 1, err))
}

/// Insert seed data, optionally wiping existing rows first
pub async fn seed_database(
    repo: &dyn Repository,
    data: &SeedData,
    clear: bool,
) -> Result<SeedReport> {
    if clear {
        info!("Clearing existing data");
        repo.clear().await?;
    }

    info!(
        winners = data.winners.len(),
        matches = data.matches.len(),
        "Loaded seed data"
    );

    let mut report = SeedReport::default();

    for winner in &data.winners {
        if repo.insert_winner_if_absent(winner).await? {
            report.winners_inserted += 1;
        }
    }
    info!("Seeded {} winners", report.winners_inserted);

    for record in &data.matches {
        if repo.insert_match_if_absent(record).await? {
            report.matches_inserted += 1;
        }
    }
    info!("Seeded {} matches", report.matches_inserted);

    report.total_winners = repo.count_winners().await?;
    report.total_matches = repo.count_matches().await?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::InMemoryRepository;
    use chrono::NaiveDate;

    fn sample() -> SeedData {
        let winners = vec![
            Winner::new(1950, "Uruguay", "Brazil").unwrap(),
            Winner::new(2018, "France", "Russia").unwrap(),
        ];
        let matches = vec![Match::new(
            2018,
            "Final",
            NaiveDate::from_ymd_opt(2018, 7, 15).unwrap(),
            "France",
            "Croatia",
            4,
            2,
        )
        .unwrap()];
        SeedData::from_records(winners, matches).unwrap()
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = InMemoryRepository::new();
        let data = sample();

        let first = seed_database(&repo, &data, false).await.unwrap();
        assert_eq!(first.winners_inserted, 2);
        assert_eq!(first.matches_inserted, 1);

        let second = seed_database(&repo, &data, false).await.unwrap();
        assert_eq!(second.winners_inserted, 0);
        assert_eq!(second.matches_inserted, 0);
        assert_eq!(second.total_winners, 2);
        assert_eq!(second.total_matches, 1);
    }

    #[tokio::test]
    async fn test_seed_with_clear_replaces_simulations() {
        let repo = InMemoryRepository::new();
        repo.create_winner(&Winner::simulated(2026, "Brazil").unwrap())
            .await
            .unwrap();

        let report = seed_database(&repo, &sample(), true).await.unwrap();
        assert_eq!(report.total_winners, 2);
        assert_eq!(repo.find_winner_by_year(2026).await.unwrap(), None);
    }

    #[test]
    fn test_from_records_rejects_invalid_winner() {
        let bad = Winner {
            year: 1930,
            winner: "Uruguay".to_string(),
            host_country: "Uruguay".to_string(),
        };
        let err = SeedData::from_records(vec![bad], vec![]).unwrap_err();
        assert!(err.to_string().contains("winners.json record #1"));
    }
}
