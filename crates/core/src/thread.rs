//! Thread enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The level of government a thread discusses. Stored as a TEXT column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadLevel {
    Federal,
    State,
}

impl ThreadLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ThreadLevel::Federal => "federal",
            ThreadLevel::State => "state",
        }
    }
}

impl fmt::Display for ThreadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThreadLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "federal" => Ok(ThreadLevel::Federal),
            "state" => Ok(ThreadLevel::State),
            other => Err(CoreError::Validation(format!(
                "unknown thread level '{other}'"
            ))),
        }
    }
}
