//! Vote types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::report::ReportId;

/// Opaque user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The single choice a vote can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    Up,
    Down,
}

impl VoteChoice {
    /// The other choice.
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// An up/down vote. At most one exists per (report, user) pair; the ledger
/// overwrites or deletes it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub report_id: ReportId,
    pub user_id: UserId,
    pub choice: VoteChoice,
}

impl Vote {
    pub fn new(report_id: ReportId, user_id: UserId, choice: VoteChoice) -> Self {
        Self {
            report_id,
            user_id,
            choice,
        }
    }
}

/// A validation vote. At most one per (report, user); written once and
/// never updated or deleted — validation is not revocable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationVote {
    pub report_id: ReportId,
    pub user_id: UserId,
    pub cast_at: DateTime<Utc>,
}

impl ValidationVote {
    pub fn new(report_id: ReportId, user_id: UserId, cast_at: DateTime<Utc>) -> Self {
        Self {
            report_id,
            user_id,
            cast_at,
        }
    }
}

/// Aggregate up/down counts for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    pub up: usize,
    pub down: usize,
}

impl Tally {
    /// Fold one choice into the tally.
    pub fn count(&mut self, choice: VoteChoice) {
        match choice {
            VoteChoice::Up => self.up += 1,
            VoteChoice::Down => self.down += 1,
        }
    }
}
