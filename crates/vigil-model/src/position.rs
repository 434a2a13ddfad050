//! Device position fixes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vigil_geo::GeoPoint;

/// One location fix from the device's location feed.
///
/// Immutable snapshot: a newer fix supersedes an older one, nothing is
/// mutated in place. The feed contract promises monotonically
/// non-decreasing `observed_at`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub point: GeoPoint,
    pub observed_at: DateTime<Utc>,
}

impl Position {
    /// A fix at the given point and time.
    pub const fn new(point: GeoPoint, observed_at: DateTime<Utc>) -> Self {
        Self { point, observed_at }
    }

    /// Age of this fix relative to `now`. Zero if `now` is earlier.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        (now - self.observed_at).max(chrono::Duration::zero())
    }
}
