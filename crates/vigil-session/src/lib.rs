//! Vigil Session
//!
//! Wires the proximity engine to its collaborators: a location feed, a
//! report change feed, and a notification sink.
//!
//! # Feeds
//!
//! Both feeds are snapshot/event streams delivered over channels; a
//! subscription is the receiving half, and dropping it unsubscribes. The
//! report feed delivers the *entire current set* of matching reports on
//! every change, never a diff — consumers recompute derived state from
//! each snapshot.
//!
//! # Lifecycle
//!
//! [`ProximitySession`] owns one tracker and one engine for its whole
//! life, runs them on a background task, and tears down explicitly:
//! [`ProximitySession::shutdown`] resolves only after the task has
//! exited, after which no further notification can fire.

mod feed;
mod session;
mod sink;

pub use feed::{SimulatedLocationFeed, SimulatedReportFeed};
pub use session::ProximitySession;
pub use sink::{FiredNotification, NotificationSink, RecordingSink, TracingSink};
