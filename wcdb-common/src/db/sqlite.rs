//! SQLite-backed repository

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::db::models::{team_key, Match, Winner};
use crate::db::repository::Repository;
use crate::{Error, Result};

/// Repository over a shared SQLite pool
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn winner_from_row(row: &SqliteRow) -> Result<Winner> {
    Ok(Winner {
        year: row.try_get("year")?,
        winner: row.try_get("winner")?,
        host_country: row.try_get("host_country")?,
    })
}

fn match_from_row(row: &SqliteRow) -> Result<Match> {
    Ok(Match {
        id: Some(row.try_get("id")?),
        year: row.try_get("year")?,
        stage: row.try_get("stage")?,
        date: row.try_get("date")?,
        team1: row.try_get("team1")?,
        team2: row.try_get("team2")?,
        score1: row.try_get("score1")?,
        score2: row.try_get("score2")?,
    })
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn find_winner_by_year(&self, year: i32) -> Result<Option<Winner>> {
        let row = sqlx::query("SELECT year, winner, host_country FROM winners WHERE year = ?")
            .bind(year)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(winner_from_row).transpose()
    }

    async fn find_winners_up_to(&self, max_year: i32) -> Result<Vec<Winner>> {
        let rows = sqlx::query(
            "SELECT year, winner, host_country FROM winners WHERE year <= ? ORDER BY year ASC",
        )
        .bind(max_year)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(winner_from_row).collect()
    }

    async fn create_winner(&self, winner: &Winner) -> Result<Winner> {
        winner.validate()?;

        sqlx::query(
            r#"
            INSERT INTO winners (year, winner, host_country, created_at, updated_at)
            VALUES (?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(winner.year)
        .bind(&winner.winner)
        .bind(&winner.host_country)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::from_insert(e, format!("winner for year {}", winner.year)))?;

        Ok(winner.clone())
    }

    async fn find_matches_between(&self, team_a: &str, team_b: &str) -> Result<Vec<Match>> {
        let (a, b) = (team_key(team_a), team_key(team_b));

        let rows = sqlx::query(
            r#"
            SELECT id, year, stage, date, team1, team2, score1, score2
            FROM matches
            WHERE (team1_key = ? AND team2_key = ?)
               OR (team1_key = ? AND team2_key = ?)
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(&a)
        .bind(&b)
        .bind(&b)
        .bind(&a)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(match_from_row).collect()
    }

    async fn insert_match_if_absent(&self, record: &Match) -> Result<bool> {
        record.validate()?;

        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO matches (
                year, stage, date, team1, team2, team1_key, team2_key,
                score1, score2, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            "#,
        )
        .bind(record.year)
        .bind(&record.stage)
        .bind(record.date)
        .bind(&record.team1)
        .bind(&record.team2)
        .bind(team_key(&record.team1))
        .bind(team_key(&record.team2))
        .bind(record.score1)
        .bind(record.score2)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_winners(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM winners")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_matches(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM matches")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn clear(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM matches").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM winners").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::connect_in_memory;
    use chrono::NaiveDate;

    async fn repo() -> SqliteRepository {
        SqliteRepository::new(connect_in_memory().await.expect("in-memory database"))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_winner() {
        let repo = repo().await;
        let w = Winner::new(2018, "France", "Russia").unwrap();
        repo.create_winner(&w).await.unwrap();

        let found = repo.find_winner_by_year(2018).await.unwrap();
        assert_eq!(found, Some(w));
        assert_eq!(repo.find_winner_by_year(2026).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_winner_reports_duplicate_year() {
        let repo = repo().await;
        repo.create_winner(&Winner::new(2018, "France", "Russia").unwrap())
            .await
            .unwrap();

        let err = repo
            .create_winner(&Winner::new(2018, "Croatia", "Russia").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Duplicate(_)), "got {:?}", err);
        assert_eq!(repo.count_winners().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_winner_if_absent_keeps_first_row() {
        let repo = repo().await;
        assert!(repo
            .insert_winner_if_absent(&Winner::new(1950, "Uruguay", "Brazil").unwrap())
            .await
            .unwrap());
        assert!(!repo
            .insert_winner_if_absent(&Winner::new(1950, "Brazil", "Brazil").unwrap())
            .await
            .unwrap());
        let w = repo.find_winner_by_year(1950).await.unwrap().unwrap();
        assert_eq!(w.winner, "Uruguay");
    }

    #[tokio::test]
    async fn test_find_winners_up_to_is_ordered_and_bounded() {
        let repo = repo().await;
        for (year, name) in [(2022, "Argentina"), (1950, "Uruguay"), (2026, "Brazil")] {
            let host = if year == 2026 { "TBD" } else { "Somewhere" };
            repo.create_winner(&Winner::new(year, name, host).unwrap())
                .await
                .unwrap();
        }

        let years: Vec<i32> = repo
            .find_winners_up_to(2022)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.year)
            .collect();
        assert_eq!(years, vec![1950, 2022]);
    }

    #[tokio::test]
    async fn test_find_matches_between_is_unordered_and_case_insensitive() {
        let repo = repo().await;
        let semi =
            Match::new(2014, "Semi-final", date(2014, 7, 8), "Brazil", "Germany", 1, 7).unwrap();
        let final_2002 =
            Match::new(2002, "Final", date(2002, 6, 30), "Germany", "Brazil", 0, 2).unwrap();
        let other =
            Match::new(2014, "Final", date(2014, 7, 13), "Germany", "Argentina", 1, 0).unwrap();
        for m in [&semi, &final_2002, &other] {
            assert!(repo.insert_match_if_absent(m).await.unwrap());
        }

        let found = repo.find_matches_between("BRAZIL", "germany").await.unwrap();
        let years: Vec<i32> = found.iter().map(|m| m.year).collect();
        assert_eq!(years, vec![2002, 2014]);
        assert!(found.iter().all(|m| m.id.is_some()));

        let reversed = repo.find_matches_between("Germany", "Brazil").await.unwrap();
        assert_eq!(found, reversed);
    }

    #[tokio::test]
    async fn test_find_matches_folds_non_ascii_names() {
        let repo = repo().await;
        let m = Match::new(
            2006,
            "Group Stage",
            date(2006, 6, 11),
            "Côte d'Ivoire",
            "Argentina",
            1,
            2,
        )
        .unwrap();
        repo.insert_match_if_absent(&m).await.unwrap();

        let found = repo.find_matches_between("CÔTE D'IVOIRE", "argentina").await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_same_day_matches_keep_insertion_order() {
        let repo = repo().await;
        let first = Match::new(
            1954,
            "Group Stage",
            date(1954, 6, 20),
            "Hungary",
            "West Germany",
            8,
            3,
        )
        .unwrap();
        let second =
            Match::new(1954, "Replay", date(1954, 6, 20), "West Germany", "Hungary", 0, 0).unwrap();
        repo.insert_match_if_absent(&first).await.unwrap();
        repo.insert_match_if_absent(&second).await.unwrap();

        let found = repo.find_matches_between("hungary", "west germany").await.unwrap();
        let stages: Vec<&str> = found.iter().map(|m| m.stage.as_str()).collect();
        assert_eq!(stages, vec!["Group Stage", "Replay"]);
    }

    #[tokio::test]
    async fn test_insert_match_if_absent_skips_natural_key_duplicates() {
        let repo = repo().await;
        let m = Match::new(2022, "Final", date(2022, 12, 18), "Argentina", "France", 3, 3).unwrap();
        assert!(repo.insert_match_if_absent(&m).await.unwrap());
        assert!(!repo.insert_match_if_absent(&m).await.unwrap());
        assert_eq!(repo.count_matches().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let repo = repo().await;
        repo.create_winner(&Winner::new(2022, "Argentina", "Qatar").unwrap())
            .await
            .unwrap();
        let m = Match::new(2022, "Final", date(2022, 12, 18), "Argentina", "France", 3, 3).unwrap();
        repo.insert_match_if_absent(&m).await.unwrap();

        repo.clear().await.unwrap();
        assert_eq!(repo.count_winners().await.unwrap(), 0);
        assert_eq!(repo.count_matches().await.unwrap(), 0);
    }
}
