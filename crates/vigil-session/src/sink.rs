//! Notification delivery seam.

use std::sync::Mutex;
use std::time::Duration;

use vigil_model::ReportId;

/// Where proximity notifications go.
///
/// Fire-and-forget: delivery guarantees belong to the OS notification
/// collaborator behind the implementation, not to the session.
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification.
    fn fire(&self, report: &ReportId, title: &str, body: &str);
}

/// A notification captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredNotification {
    pub report_id: ReportId,
    pub title: String,
    pub body: String,
}

/// Sink that records everything fired, for tests and simulations.
#[derive(Debug, Default)]
pub struct RecordingSink {
    fired: Mutex<Vec<FiredNotification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifications fired so far.
    pub fn count(&self) -> usize {
        self.fired.lock().expect("sink lock").len()
    }

    /// Snapshot of everything fired so far.
    pub fn fired(&self) -> Vec<FiredNotification> {
        self.fired.lock().expect("sink lock").clone()
    }

    /// Wait until at least `count` notifications have fired.
    ///
    /// The session processes feed events on its own task, so tests that
    /// just published an event poll here instead of guessing at sleeps.
    /// Returns `false` on timeout.
    pub async fn wait_for_count(&self, count: usize, timeout: Duration) -> bool {
        let poll = Duration::from_millis(5);
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.count() >= count {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(poll).await;
        }
    }
}

impl NotificationSink for RecordingSink {
    fn fire(&self, report: &ReportId, title: &str, body: &str) {
        self.fired.lock().expect("sink lock").push(FiredNotification {
            report_id: report.clone(),
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

/// Sink that logs notifications instead of delivering them.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn fire(&self, report: &ReportId, title: &str, body: &str) {
        tracing::info!(%report, title, body, "notification");
    }
}
