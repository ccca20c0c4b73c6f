//! Request input validation
//!
//! Each rule takes the raw fields of one request part (path, query, or JSON body,
//! chosen by the endpoint) and returns a normalized value. Unknown fields are ignored.
//! A failing rule records every problem it finds, in field order, and the first one
//! is what callers see.

use serde_json::{Map, Value};
use std::fmt;

mod team_pair;
mod year;

pub use team_pair::{TeamPair, TeamPairRule};
pub use year::{TournamentYearRule, YearInput, YearRule};

/// Raw request fields fed to a validator
pub type Fields = Map<String, Value>;

/// Input rejected by a validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// `None` when `messages` is empty
    fn from_messages(messages: Vec<String>) -> Option<Self> {
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    /// The message surfaced to clients
    pub fn message(&self) -> &str {
        &self.messages[0]
    }

    /// Every problem found, in the order it was detected
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// A validation rule producing a normalized value
pub trait Validator {
    type Output;

    fn validate(&self, input: &Fields) -> Result<Self::Output, ValidationError>;
}
