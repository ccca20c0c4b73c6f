//! Team pair rule for match lookups
//!
//! Names are trimmed but keep their case; matching is case-insensitive further down.

use serde_json::Value;

use super::{Fields, ValidationError, Validator};

/// Normalized pair of team names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamPair {
    pub team1: String,
    pub team2: String,
}

/// Both `team1` and `team2` must be non-empty strings after trimming
#[derive(Debug, Clone, Copy, Default)]
pub struct TeamPairRule;

impl Validator for TeamPairRule {
    type Output = TeamPair;

    fn validate(&self, input: &Fields) -> Result<TeamPair, ValidationError> {
        let mut messages = Vec::new();
        let team1 = check_team(input, "team1", "Team 1", &mut messages);
        let team2 = check_team(input, "team2", "Team 2", &mut messages);

        match (team1, team2) {
            (Some(team1), Some(team2)) => Ok(TeamPair { team1, team2 }),
            _ => Err(ValidationError::from_messages(messages)
                .unwrap_or_else(|| ValidationError::new("Invalid team names"))),
        }
    }
}

fn check_team(
    input: &Fields,
    key: &str,
    label: &str,
    messages: &mut Vec<String>,
) -> Option<String> {
    match input.get(key) {
        None => {
            messages.push(format!("{} is required", label));
            None
        }
        Some(Value::String(name)) => {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                messages.push(format!("{} name cannot be empty", label));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            messages.push(format!("{} must be a string", label));
            None
        }
    }
}
