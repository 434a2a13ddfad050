//! Elapsed time from report creation to validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time from a report's creation to the moment quorum was reached,
/// truncated to whole minutes.
///
/// Display-oriented derived field; rendered as `"H:MM"` with zero-padded
/// minutes. Deterministic for a given pair of timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationElapsed {
    pub hours: i64,
    pub minutes: i64,
}

impl ValidationElapsed {
    /// Elapsed time between two instants, truncated to whole minutes.
    ///
    /// A `quorum_at` earlier than `created_at` (clock skew between the
    /// backend and the client) clamps to zero rather than going negative.
    pub fn between(created_at: DateTime<Utc>, quorum_at: DateTime<Utc>) -> Self {
        let total_minutes = (quorum_at - created_at).num_minutes().max(0);
        Self {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
        }
    }
}

impl std::fmt::Display for ValidationElapsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}", self.hours, self.minutes)
    }
}
