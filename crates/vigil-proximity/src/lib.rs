//! Vigil Proximity Engine
//!
//! Decides when a moving device should be notified about nearby open
//! incident reports, and never more than once per visit.
//!
//! # Hysteresis
//!
//! A single radius flaps: a device hovering at the boundary would fire on
//! every GPS jitter. Two radii fix that:
//!
//! - enter at ≤ 200 m — fire once and arm
//! - exit at > 1000 m — disarm, eligible to fire again
//!
//! Between the radii nothing changes. A report fires exactly once per
//! entry into the inner ring.
//!
//! # Ownership
//!
//! The arm table lives inside one [`ProximityEngine`] instance owned by
//! the session that drives the feeds. It is process-local and lost on
//! restart; the engine then re-arms conservatively, which costs at most
//! one duplicate notification after a cold start.

mod engine;
mod tracker;

pub use engine::{ProximityConfig, ProximityEngine, ENTER_RADIUS_M, EXIT_RADIUS_M};
pub use tracker::GeofenceTracker;
