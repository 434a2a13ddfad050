//! In-process store backing for tests and simulations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use vigil_model::{Report, ReportId, Tally, UserId, ValidationElapsed, ValidationVote, Vote};

use crate::error::{Result, StoreError};
use crate::store::{ReportWriter, ValidationStore, VoteStore};

/// Shared in-memory document store.
///
/// Stands in for the backend as the single source of truth when several
/// simulated clients run in one process. Per-key operations are atomic
/// (one shard lock at a time), matching the document-level atomicity the
/// real backend provides; there is still no multi-key transaction, which
/// is exactly the consistency level the consensus components are designed
/// against.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reports: DashMap<ReportId, Report>,
    votes: DashMap<(ReportId, UserId), Vote>,
    validations: DashMap<(ReportId, UserId), ValidationVote>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a report document.
    pub fn upsert_report(&self, report: Report) {
        self.reports.insert(report.id.clone(), report);
    }

    /// Remove a report document.
    pub fn remove_report(&self, id: &ReportId) {
        self.reports.remove(id);
    }

    /// Read a report document.
    pub fn report(&self, id: &ReportId) -> Option<Report> {
        self.reports.get(id).map(|r| r.value().clone())
    }

    /// All reports that are still open.
    pub fn open_reports(&self) -> Vec<Report> {
        self.reports
            .iter()
            .filter(|r| r.is_open())
            .map(|r| r.value().clone())
            .collect()
    }
}

#[async_trait]
impl VoteStore for MemoryStore {
    async fn get_vote(&self, report: &ReportId, user: &UserId) -> Result<Option<Vote>> {
        let key = (report.clone(), user.clone());
        Ok(self.votes.get(&key).map(|v| v.value().clone()))
    }

    async fn put_vote(&self, vote: Vote) -> Result<()> {
        let key = (vote.report_id.clone(), vote.user_id.clone());
        self.votes.insert(key, vote);
        Ok(())
    }

    async fn delete_vote(&self, report: &ReportId, user: &UserId) -> Result<()> {
        let key = (report.clone(), user.clone());
        self.votes.remove(&key);
        Ok(())
    }

    async fn tally(&self, report: &ReportId) -> Result<Tally> {
        let mut tally = Tally::default();
        for vote in self.votes.iter() {
            if &vote.report_id == report {
                tally.count(vote.choice);
            }
        }
        Ok(tally)
    }
}

#[async_trait]
impl ValidationStore for MemoryStore {
    async fn get_validation(
        &self,
        report: &ReportId,
        user: &UserId,
    ) -> Result<Option<ValidationVote>> {
        let key = (report.clone(), user.clone());
        Ok(self.validations.get(&key).map(|v| v.value().clone()))
    }

    async fn put_validation(&self, vote: ValidationVote) -> Result<()> {
        let key = (vote.report_id.clone(), vote.user_id.clone());
        self.validations.insert(key, vote);
        Ok(())
    }

    async fn count_distinct_voters(&self, report: &ReportId) -> Result<usize> {
        // Keys are (report, user), so counting matching keys counts
        // distinct users.
        Ok(self
            .validations
            .iter()
            .filter(|v| &v.report_id == report)
            .count())
    }
}

#[async_trait]
impl ReportWriter for MemoryStore {
    async fn mark_validated(
        &self,
        report: &ReportId,
        validated_at: DateTime<Utc>,
        elapsed: ValidationElapsed,
    ) -> Result<bool> {
        let mut entry = self
            .reports
            .get_mut(report)
            .ok_or_else(|| StoreError::UnknownReport(report.clone()))?;

        if entry.validated {
            return Ok(false);
        }
        entry.validated = true;
        entry.validated_at = Some(validated_at);
        entry.validation_elapsed = Some(elapsed);
        Ok(true)
    }
}
