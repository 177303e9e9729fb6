//! Civi and activity enumerations.
//!
//! Both enums are stored as TEXT columns and carried as snake_case strings
//! on the wire, so each provides `as_str` / `FromStr` alongside the serde
//! derives.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The kind of statement a civi makes within a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiviType {
    Problem,
    Cause,
    Solution,
    Response,
    Rebuttal,
}

impl CiviType {
    pub fn as_str(self) -> &'static str {
        match self {
            CiviType::Problem => "problem",
            CiviType::Cause => "cause",
            CiviType::Solution => "solution",
            CiviType::Response => "response",
            CiviType::Rebuttal => "rebuttal",
        }
    }
}

impl fmt::Display for CiviType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CiviType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "problem" => Ok(CiviType::Problem),
            "cause" => Ok(CiviType::Cause),
            "solution" => Ok(CiviType::Solution),
            "response" => Ok(CiviType::Response),
            "rebuttal" => Ok(CiviType::Rebuttal),
            other => Err(CoreError::Validation(format!(
                "unknown civi type '{other}'"
            ))),
        }
    }
}

/// A logged user action against a civi.
///
/// The activity log is append-only; records are never mutated or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    VoteWtf,
    VoteVeryneg,
    VoteNeg,
    VotePos,
    VoteVerypos,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::VoteWtf => "vote_wtf",
            ActivityType::VoteVeryneg => "vote_veryneg",
            ActivityType::VoteNeg => "vote_neg",
            ActivityType::VotePos => "vote_pos",
            ActivityType::VoteVerypos => "vote_verypos",
        }
    }

    /// Contribution of this vote kind to a civi's score.
    pub fn weight(self) -> i64 {
        match self {
            ActivityType::VoteVeryneg => -2,
            ActivityType::VoteNeg => -1,
            ActivityType::VoteWtf => 0,
            ActivityType::VotePos => 1,
            ActivityType::VoteVerypos => 2,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vote_wtf" => Ok(ActivityType::VoteWtf),
            "vote_veryneg" => Ok(ActivityType::VoteVeryneg),
            "vote_neg" => Ok(ActivityType::VoteNeg),
            "vote_pos" => Ok(ActivityType::VotePos),
            "vote_verypos" => Ok(ActivityType::VoteVerypos),
            other => Err(CoreError::Validation(format!(
                "unknown activity type '{other}'"
            ))),
        }
    }
}
