//! Year rules
//!
//! `year` may arrive as a JSON number or as a numeric string (path segments and
//! query values are always strings). Whitespace around a string is ignored.

use serde_json::Value;
use wcdb_common::FIRST_TOURNAMENT_YEAR;

use super::{Fields, ValidationError, Validator};

pub const YEAR_REQUIRED: &str = "Year is required";
pub const YEAR_NOT_A_NUMBER: &str = "Year must be a number";
pub const YEAR_NOT_INTEGER: &str = "Year must be an integer";
pub const YEAR_BELOW_MINIMUM: &str = "Year must be 1950 or later";
pub const YEAR_OUT_OF_RANGE: &str = "Year is out of range";
pub const YEAR_NOT_TOURNAMENT: &str = "Year must be a valid World Cup year (1950, 1954, 1958, ...)";

/// Tournaments are held every four years starting in 1950
const TOURNAMENT_CADENCE: i64 = 4;

/// Normalized output of the year rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearInput {
    pub year: i32,
}

/// Any integer year from 1950 on
#[derive(Debug, Clone, Copy, Default)]
pub struct YearRule;

/// A year from 1950 on that falls on the four-year tournament cadence
#[derive(Debug, Clone, Copy, Default)]
pub struct TournamentYearRule;

impl Validator for YearRule {
    type Output = YearInput;

    fn validate(&self, input: &Fields) -> Result<YearInput, ValidationError> {
        check_year(input, false)
    }
}

impl Validator for TournamentYearRule {
    type Output = YearInput;

    fn validate(&self, input: &Fields) -> Result<YearInput, ValidationError> {
        check_year(input, true)
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn check_year(input: &Fields, require_cadence: bool) -> Result<YearInput, ValidationError> {
    let Some(raw) = input.get("year") else {
        return Err(ValidationError::new(YEAR_REQUIRED));
    };
    let Some(number) = coerce_number(raw) else {
        return Err(ValidationError::new(YEAR_NOT_A_NUMBER));
    };

    let mut messages = Vec::new();
    let is_integer = number.fract() == 0.0;

    if !is_integer {
        messages.push(YEAR_NOT_INTEGER.to_string());
    }
    if number < f64::from(FIRST_TOURNAMENT_YEAR) {
        messages.push(YEAR_BELOW_MINIMUM.to_string());
    }
    if number > f64::from(i32::MAX) {
        messages.push(YEAR_OUT_OF_RANGE.to_string());
    }
    if require_cadence
        && is_integer
        && (number as i64 - i64::from(FIRST_TOURNAMENT_YEAR)) % TOURNAMENT_CADENCE != 0
    {
        messages.push(YEAR_NOT_TOURNAMENT.to_string());
    }

    match ValidationError::from_messages(messages) {
        Some(err) => Err(err),
        None => Ok(YearInput {
            year: number as i32,
        }),
    }
}
