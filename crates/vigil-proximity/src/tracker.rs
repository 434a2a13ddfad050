//! Latest-fix holder for the device location feed.

use chrono::{DateTime, Utc};
use vigil_model::Position;

/// Holds the single most recent location fix.
///
/// No buffering, no history. "No fix yet" ([`GeofenceTracker::latest`]
/// returning `None`) is a distinct state from "fix known but old" —
/// dependents must not evaluate proximity without a fix at all, and can
/// use [`GeofenceTracker::age`] to judge staleness of one they have.
///
/// If location permission is denied the feed never emits and the tracker
/// simply stays empty; dependents degrade to skipping proximity checks.
#[derive(Debug, Default)]
pub struct GeofenceTracker {
    latest: Option<Position>,
}

impl GeofenceTracker {
    /// A tracker with no fix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fix. Returns whether it replaced the held one.
    ///
    /// The feed contract promises monotonically non-decreasing
    /// `observed_at`; a fix older than the held one is dropped here so a
    /// misbehaving feed cannot roll the position back.
    pub fn update(&mut self, fix: Position) -> bool {
        if let Some(current) = &self.latest {
            if fix.observed_at < current.observed_at {
                tracing::warn!(
                    held = %current.observed_at,
                    received = %fix.observed_at,
                    "dropping out-of-order location fix"
                );
                return false;
            }
        }
        self.latest = Some(fix);
        true
    }

    /// The most recent fix, if any has arrived.
    pub fn latest(&self) -> Option<&Position> {
        self.latest.as_ref()
    }

    /// Age of the held fix relative to `now`; `None` without a fix.
    pub fn age(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.latest.as_ref().map(|fix| fix.age(now))
    }

    /// Whether the held fix is older than `max_age`.
    ///
    /// `false` when no fix exists at all — "no position yet" and
    /// "position known but stale" are different states, and only the
    /// caller holding a fix should reason about its freshness.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: chrono::Duration) -> bool {
        self.age(now).is_some_and(|age| age > max_age)
    }

    /// Forget the held fix (e.g. when location permission is revoked).
    pub fn clear(&mut self) {
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vigil_geo::GeoPoint;

    fn fix_at(second: u32) -> Position {
        Position::new(
            GeoPoint::new(18.48, -69.93),
            Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, second).unwrap(),
        )
    }

    #[test]
    fn starts_empty() {
        let tracker = GeofenceTracker::new();
        assert!(tracker.latest().is_none());
        assert!(tracker.age(Utc::now()).is_none());
    }

    #[test]
    fn holds_only_the_newest_fix() {
        let mut tracker = GeofenceTracker::new();
        assert!(tracker.update(fix_at(0)));
        assert!(tracker.update(fix_at(5)));
        assert_eq!(tracker.latest(), Some(&fix_at(5)));
    }

    #[test]
    fn drops_out_of_order_fix() {
        let mut tracker = GeofenceTracker::new();
        tracker.update(fix_at(10));
        assert!(!tracker.update(fix_at(3)));
        assert_eq!(tracker.latest(), Some(&fix_at(10)));
    }

    #[test]
    fn equal_timestamp_supersedes() {
        // Same-instant re-delivery is allowed by the monotone contract.
        let mut tracker = GeofenceTracker::new();
        tracker.update(fix_at(10));
        let replacement = Position::new(GeoPoint::new(18.49, -69.93), fix_at(10).observed_at);
        assert!(tracker.update(replacement));
        assert_eq!(tracker.latest().unwrap().point, GeoPoint::new(18.49, -69.93));
    }

    #[test]
    fn age_of_held_fix() {
        let mut tracker = GeofenceTracker::new();
        tracker.update(fix_at(0));
        let now = fix_at(30).observed_at;
        assert_eq!(tracker.age(now), Some(chrono::Duration::seconds(30)));
    }

    #[test]
    fn staleness_requires_a_fix() {
        let mut tracker = GeofenceTracker::new();
        let now = fix_at(0).observed_at + chrono::Duration::minutes(10);

        // No fix: not "stale", just absent.
        assert!(!tracker.is_stale(now, chrono::Duration::minutes(1)));

        tracker.update(fix_at(0));
        assert!(tracker.is_stale(now, chrono::Duration::minutes(1)));
        assert!(!tracker.is_stale(now, chrono::Duration::minutes(15)));
    }

    #[test]
    fn clear_forgets_the_fix() {
        let mut tracker = GeofenceTracker::new();
        tracker.update(fix_at(0));
        tracker.clear();
        assert!(tracker.latest().is_none());
    }
}
