//! The long-lived proximity session task.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use vigil_model::{Position, Report};
use vigil_proximity::{GeofenceTracker, ProximityConfig, ProximityEngine};

use crate::sink::NotificationSink;

/// Owns one tracker and one proximity engine, drives them from the
/// location and report feeds, and fires the sink for every id the engine
/// emits.
///
/// Constructed once per app session. Both feeds and the arm table live
/// and die with this instance; nothing is ambient or static. Events from
/// the two feeds interleave arbitrarily — the engine re-derives its
/// decision from the latest fix plus the latest snapshot, so ordering
/// between the streams does not matter.
pub struct ProximitySession {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ProximitySession {
    /// Spawn the session over its two subscriptions and a sink.
    ///
    /// The session consumes the receivers; unsubscribing is part of
    /// [`ProximitySession::shutdown`]. If either feed closes on its own
    /// the session winds down.
    pub fn spawn(
        config: ProximityConfig,
        positions: mpsc::UnboundedReceiver<Position>,
        snapshots: mpsc::UnboundedReceiver<Vec<Report>>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run(config, positions, snapshots, sink, shutdown_rx));
        Self { shutdown, task }
    }

    /// Tear the session down.
    ///
    /// Resolves only after the event task has exited: afterwards no
    /// further notification fires, no matter what the feeds publish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

async fn run(
    config: ProximityConfig,
    mut positions: mpsc::UnboundedReceiver<Position>,
    mut snapshots: mpsc::UnboundedReceiver<Vec<Report>>,
    sink: Arc<dyn NotificationSink>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut tracker = GeofenceTracker::new();
    let mut engine = ProximityEngine::with_config(config);
    let mut open_reports: Vec<Report> = Vec::new();

    info!("proximity session started");
    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                // Err means the handle was dropped without an explicit
                // shutdown; stop rather than spin on a closed channel.
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            fix = positions.recv() => {
                let Some(fix) = fix else { break };
                if tracker.update(fix) {
                    fire_due(&mut engine, &tracker, &open_reports, sink.as_ref());
                }
            }
            snapshot = snapshots.recv() => {
                let Some(snapshot) = snapshot else { break };
                debug!(reports = snapshot.len(), "report snapshot received");
                open_reports = snapshot;
                engine.prune(&open_reports);
                fire_due(&mut engine, &tracker, &open_reports, sink.as_ref());
            }
        }
    }
    info!("proximity session stopped");
}

/// Evaluate the current fix against the current snapshot and deliver
/// whatever newly crossed the notify threshold.
fn fire_due(
    engine: &mut ProximityEngine,
    tracker: &GeofenceTracker,
    reports: &[Report],
    sink: &dyn NotificationSink,
) {
    let Some(position) = tracker.latest() else {
        // No fix yet (or permission denied upstream): skip evaluation
        // entirely rather than treating "unknown" as a location.
        return;
    };

    for id in engine.evaluate(position, reports) {
        if let Some(report) = reports.iter().find(|r| r.id == id) {
            let (title, body) = notification_text(report);
            sink.fire(&id, &title, &body);
        }
    }
}

/// Human-readable notification content for a nearby report.
fn notification_text(report: &Report) -> (String, String) {
    (
        "Incident reported near you".to_string(),
        format!("A {} report is active in your area", report.category),
    )
}
