//! In-process feed implementations.
//!
//! These stand in for the platform location service and the backend
//! change feed when simulating the pipeline in one process. They honor
//! the same contracts the real collaborators must: the location feed
//! emits fixes in observation order, and the report feed emits a full
//! snapshot of matching reports on every change.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;
use vigil_model::{Position, Report, ReportCategory, ReportId};

/// Publisher side of a simulated device location feed.
#[derive(Debug, Default)]
pub struct SimulatedLocationFeed {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Position>>>,
}

impl SimulatedLocationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to future fixes. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<Position> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().expect("feed lock").push(tx);
        rx
    }

    /// Publish one fix to all live subscribers.
    pub fn publish(&self, fix: Position) {
        self.subscribers
            .lock()
            .expect("feed lock")
            .retain(|tx| tx.send(fix).is_ok());
    }
}

struct ReportSubscriber {
    filter: Option<ReportCategory>,
    tx: mpsc::UnboundedSender<Vec<Report>>,
}

/// Publisher side of a simulated report change feed.
///
/// Keeps the authoritative set of reports and pushes the full filtered
/// snapshot to every subscriber on each change, matching the
/// snapshot-stream contract: consumers never see diffs.
#[derive(Default)]
pub struct SimulatedReportFeed {
    inner: Mutex<ReportFeedInner>,
}

#[derive(Default)]
struct ReportFeedInner {
    reports: HashMap<ReportId, Report>,
    subscribers: Vec<ReportSubscriber>,
}

impl SimulatedReportFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to snapshots, optionally filtered by category.
    ///
    /// The current snapshot is delivered immediately so a new subscriber
    /// does not wait for the next change. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(
        &self,
        filter: Option<ReportCategory>,
    ) -> mpsc::UnboundedReceiver<Vec<Report>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().expect("feed lock");
        let _ = tx.send(Self::snapshot(&inner.reports, filter));
        inner.subscribers.push(ReportSubscriber { filter, tx });
        rx
    }

    /// Insert or replace a report and push fresh snapshots.
    pub fn upsert(&self, report: Report) {
        let mut inner = self.inner.lock().expect("feed lock");
        inner.reports.insert(report.id.clone(), report);
        Self::notify(&mut inner);
    }

    /// Remove a report and push fresh snapshots.
    pub fn remove(&self, id: &ReportId) {
        let mut inner = self.inner.lock().expect("feed lock");
        inner.reports.remove(id);
        Self::notify(&mut inner);
    }

    fn snapshot(
        reports: &HashMap<ReportId, Report>,
        filter: Option<ReportCategory>,
    ) -> Vec<Report> {
        reports
            .values()
            .filter(|r| filter.map_or(true, |category| r.category == category))
            .cloned()
            .collect()
    }

    fn notify(inner: &mut ReportFeedInner) {
        let ReportFeedInner {
            reports,
            subscribers,
        } = inner;
        subscribers.retain(|sub| sub.tx.send(Self::snapshot(reports, sub.filter)).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use vigil_geo::GeoPoint;

    fn report(id: &str, category: ReportCategory) -> Report {
        Report::new(
            ReportId::new(id),
            category,
            GeoPoint::new(18.5, -69.9),
            Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn location_feed_delivers_to_subscriber() {
        let feed = SimulatedLocationFeed::new();
        let mut rx = feed.subscribe();

        let fix = Position::new(
            GeoPoint::new(18.5, -69.9),
            Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap(),
        );
        feed.publish(fix);

        assert_eq!(rx.recv().await, Some(fix));
    }

    #[tokio::test]
    async fn dropped_location_subscriber_is_pruned() {
        let feed = SimulatedLocationFeed::new();
        let rx = feed.subscribe();
        drop(rx);

        feed.publish(Position::new(
            GeoPoint::new(0.0, 0.0),
            Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap(),
        ));
        assert!(feed.subscribers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn report_feed_sends_initial_snapshot() {
        let feed = SimulatedReportFeed::new();
        feed.upsert(report("r-1", ReportCategory::Traffic));

        let mut rx = feed.subscribe(None);
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[tokio::test]
    async fn report_feed_sends_full_snapshot_on_every_change() {
        let feed = SimulatedReportFeed::new();
        let mut rx = feed.subscribe(None);
        assert!(rx.recv().await.unwrap().is_empty());

        feed.upsert(report("r-1", ReportCategory::Traffic));
        assert_eq!(rx.recv().await.unwrap().len(), 1);

        feed.upsert(report("r-2", ReportCategory::Security));
        assert_eq!(rx.recv().await.unwrap().len(), 2);

        feed.remove(&ReportId::new("r-1"));
        let snapshot = rx.recv().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, ReportId::new("r-2"));
    }

    #[tokio::test]
    async fn category_filter_partitions_snapshots() {
        let feed = SimulatedReportFeed::new();
        let mut traffic_rx = feed.subscribe(Some(ReportCategory::Traffic));
        assert!(traffic_rx.recv().await.unwrap().is_empty());

        feed.upsert(report("r-1", ReportCategory::Traffic));
        feed.upsert(report("r-2", ReportCategory::Security));

        // Two changes, two snapshots; the second still has only traffic.
        assert_eq!(traffic_rx.recv().await.unwrap().len(), 1);
        let second = traffic_rx.recv().await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, ReportId::new("r-1"));
    }
}
