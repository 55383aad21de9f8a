use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Whether the run provisions addresses or tears them down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    #[default]
    Add,
    Remove,
}

impl Operation {
    pub fn past_tense(&self) -> &'static str {
        match self {
            Operation::Add => "added",
            Operation::Remove => "removed",
        }
    }
}

impl FromStr for Operation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Operation::Add),
            "remove" => Ok(Operation::Remove),
            other => Err(ConfigError::InvalidOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Remove => write!(f, "remove"),
        }
    }
}
