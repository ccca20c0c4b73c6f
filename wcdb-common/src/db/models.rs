//! Database models
//!
//! Records are validated on construction and again before every insert, so a row
//! that reaches the store always satisfies the table constraints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, FIRST_TOURNAMENT_YEAR, SIMULATED_HOST_COUNTRY};

/// Tournament winner for one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub year: i32,
    pub winner: String,
    pub host_country: String,
}

impl Winner {
    pub fn new(
        year: i32,
        winner: impl Into<String>,
        host_country: impl Into<String>,
    ) -> Result<Self> {
        let record = Self {
            year,
            winner: winner.into(),
            host_country: host_country.into(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Winner produced by simulation; the host is not known yet.
    pub fn simulated(year: i32, winner: impl Into<String>) -> Result<Self> {
        Self::new(year, winner, SIMULATED_HOST_COUNTRY)
    }

    pub fn is_simulated(&self) -> bool {
        self.host_country == SIMULATED_HOST_COUNTRY
    }

    pub fn validate(&self) -> Result<()> {
        check_year(self.year)?;
        check_not_blank(&self.winner, "Winner name cannot be empty")?;
        check_not_blank(&self.host_country, "Host country name cannot be empty")?;
        Ok(())
    }
}

/// A recorded match between two teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Row id assigned by the store; also the insertion order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub year: i32,
    pub stage: String,
    pub date: NaiveDate,
    pub team1: String,
    pub team2: String,
    pub score1: i32,
    pub score2: i32,
}

impl Match {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        stage: impl Into<String>,
        date: NaiveDate,
        team1: impl Into<String>,
        team2: impl Into<String>,
        score1: i32,
        score2: i32,
    ) -> Result<Self> {
        let record = Self {
            id: None,
            year,
            stage: stage.into(),
            date,
            team1: team1.into(),
            team2: team2.into(),
            score1,
            score2,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<()> {
        check_year(self.year)?;
        check_not_blank(&self.stage, "Stage cannot be empty")?;
        check_not_blank(&self.team1, "Team 1 name cannot be empty")?;
        check_not_blank(&self.team2, "Team 2 name cannot be empty")?;
        if self.score1 < 0 {
            return Err(Error::InvalidInput("Score 1 must be non-negative".to_string()));
        }
        if self.score2 < 0 {
            return Err(Error::InvalidInput("Score 2 must be non-negative".to_string()));
        }
        Ok(())
    }

    /// True when this match was played between `a` and `b`, in either order, ignoring case.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        let (t1, t2) = (team_key(&self.team1), team_key(&self.team2));
        let (a, b) = (team_key(a), team_key(b));
        (t1 == a && t2 == b) || (t1 == b && t2 == a)
    }
}

/// Case-folded lookup key for a team name.
///
/// Stored next to each team column so case-insensitive lookups can use an index;
/// SQLite's own `LOWER()` only folds ASCII.
pub fn team_key(name: &str) -> String {
    name.to_lowercase()
}

fn check_year(year: i32) -> Result<()> {
    if year < FIRST_TOURNAMENT_YEAR {
        return Err(Error::InvalidInput(format!(
            "Year must be {} or later",
            FIRST_TOURNAMENT_YEAR
        )));
    }
    Ok(())
}

fn check_not_blank(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_winner_rejects_year_before_first_tournament() {
        let err = Winner::new(1949, "Uruguay", "Brazil").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(msg) if msg == "Year must be 1950 or later"));
    }

    #[test]
    fn test_winner_rejects_blank_names() {
        assert!(Winner::new(1950, "  ", "Brazil").is_err());
        assert!(Winner::new(1950, "Uruguay", "").is_err());
    }

    #[test]
    fn test_simulated_winner_has_placeholder_host() {
        let w = Winner::simulated(2026, "Brazil").unwrap();
        assert_eq!(w.host_country, "TBD");
        assert!(w.is_simulated());
    }

    #[test]
    fn test_match_rejects_negative_scores() {
        let err = Match::new(2014, "Final", date(2014, 7, 13), "Germany", "Argentina", -1, 0);
        assert!(err.is_err());
        let err = Match::new(2014, "Final", date(2014, 7, 13), "Germany", "Argentina", 1, -3);
        assert!(err.is_err());
    }

    #[test]
    fn test_match_rejects_empty_teams() {
        assert!(Match::new(2014, "Final", date(2014, 7, 13), "", "Argentina", 1, 0).is_err());
        assert!(Match::new(2014, "Final", date(2014, 7, 13), "Germany", " ", 1, 0).is_err());
    }

    #[test]
    fn test_is_between_ignores_order_and_case() {
        let m =
            Match::new(2014, "Semi-final", date(2014, 7, 8), "Brazil", "Germany", 1, 7).unwrap();
        assert!(m.is_between("brazil", "GERMANY"));
        assert!(m.is_between("Germany", "Brazil"));
        assert!(!m.is_between("Brazil", "Argentina"));
        assert!(!m.is_between("Brazil", "Brazil"));
    }

    #[test]
    fn test_team_key_folds_non_ascii() {
        assert_eq!(team_key("CÔTE D'IVOIRE"), "côte d'ivoire");
    }

    #[test]
    fn test_match_date_serializes_as_plain_date() {
        let m = Match::new(2002, "Final", date(2002, 6, 30), "Germany", "Brazil", 0, 2).unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["date"], "2002-06-30");
        assert!(json.get("id").is_none());
    }
}
