//! Async store traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use vigil_model::{ReportId, Tally, UserId, ValidationElapsed, ValidationVote, Vote};

use crate::error::Result;

/// Single-slot up/down vote storage, keyed by (report, user).
///
/// Only the owning user's client writes a given slot, so there is no
/// cross-user write race; the ledger on top of this trait serializes the
/// same client's rapid re-taps.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Read the vote in the (report, user) slot, if any.
    async fn get_vote(&self, report: &ReportId, user: &UserId) -> Result<Option<Vote>>;

    /// Write the slot, replacing any existing vote.
    async fn put_vote(&self, vote: Vote) -> Result<()>;

    /// Clear the slot. Clearing an empty slot is not an error.
    async fn delete_vote(&self, report: &ReportId, user: &UserId) -> Result<()>;

    /// Aggregate up/down counts for a report.
    async fn tally(&self, report: &ReportId) -> Result<Tally>;
}

/// Write-once validation vote storage, keyed by (report, user).
#[async_trait]
pub trait ValidationStore: Send + Sync {
    /// Read this user's validation vote for the report, if any.
    async fn get_validation(
        &self,
        report: &ReportId,
        user: &UserId,
    ) -> Result<Option<ValidationVote>>;

    /// Record a validation vote. Never overwrites: the quorum machine
    /// checks existence first, and a duplicate write would indicate its
    /// guard was bypassed.
    async fn put_validation(&self, vote: ValidationVote) -> Result<()>;

    /// Count distinct users who have validated the report.
    async fn count_distinct_voters(&self, report: &ReportId) -> Result<usize>;
}

/// The one report mutation the core performs.
#[async_trait]
pub trait ReportWriter: Send + Sync {
    /// Conditionally transition the report to validated.
    ///
    /// Merge-write semantics: only the validation fields are touched, so
    /// concurrent unrelated updates from other workflows are not
    /// clobbered. The write applies only if the report is not yet
    /// validated; the return value says whether *this* call performed the
    /// transition. `false` means another writer already validated it.
    async fn mark_validated(
        &self,
        report: &ReportId,
        validated_at: DateTime<Utc>,
        elapsed: ValidationElapsed,
    ) -> Result<bool>;
}
