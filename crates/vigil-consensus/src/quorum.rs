//! Validation quorum machine.
//!
//! Per report the machine has two states, Open → Validated, with no way
//! back. Independent users each cast at most one validation vote; the
//! vote that brings the distinct-voter count to quorum performs the
//! transition and stamps the elapsed-time metric.
//!
//! Unlike an up/down [`Vote`](vigil_model::Vote), a validation vote has
//! no revocation path — whether a user should regain their vote after an
//! external correction is an open product question, deliberately not
//! answered here.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error};
use vigil_model::{Report, UserId, ValidationElapsed, ValidationVote};
use vigil_store::{ReportWriter, Result, ValidationStore};

/// Distinct validators required to transition a report to validated.
pub const VALIDATION_QUORUM: usize = 3;

/// Quorum machine settings.
#[derive(Debug, Clone, Copy)]
pub struct QuorumConfig {
    /// Distinct-voter threshold.
    pub quorum: usize,
}

impl Default for QuorumConfig {
    fn default() -> Self {
        Self {
            quorum: VALIDATION_QUORUM,
        }
    }
}

impl QuorumConfig {
    /// Override the threshold.
    #[must_use]
    pub fn with_quorum(mut self, quorum: usize) -> Self {
        self.quorum = quorum;
        self
    }
}

/// Result of one validation cast.
///
/// The first two variants are expected user-facing no-ops, not errors;
/// callers surface them as messages, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The report was already validated; nothing was written.
    AlreadyValidated,
    /// This user already validated this report; nothing was written.
    DuplicateVoter,
    /// Vote recorded; quorum not reached by this call.
    Counted { voters: usize },
    /// This vote crossed the threshold and validated the report.
    QuorumReached { elapsed: ValidationElapsed },
}

impl ValidationOutcome {
    /// Whether this call performed the validated transition.
    pub const fn quorum_reached(&self) -> bool {
        matches!(self, Self::QuorumReached { .. })
    }
}

/// Drives reports from Open to Validated on distinct-voter quorum.
///
/// Multiple clients may cast near the boundary concurrently; the store's
/// conditional [`ReportWriter::mark_validated`] guarantees at most one of
/// them performs the transition, and the machine reports the race loser
/// as a plain [`ValidationOutcome::Counted`].
pub struct ValidationQuorum<V, R> {
    votes: Arc<V>,
    reports: Arc<R>,
    config: QuorumConfig,
}

impl<V, R> ValidationQuorum<V, R>
where
    V: ValidationStore,
    R: ReportWriter,
{
    /// Machine with the standard quorum.
    pub fn new(votes: Arc<V>, reports: Arc<R>) -> Self {
        Self::with_config(votes, reports, QuorumConfig::default())
    }

    /// Machine with custom settings.
    pub fn with_config(votes: Arc<V>, reports: Arc<R>, config: QuorumConfig) -> Self {
        Self {
            votes,
            reports,
            config,
        }
    }

    /// Cast one user's validation vote against a report snapshot.
    ///
    /// `report` is the caller's current snapshot; if it is stale and the
    /// report was validated meanwhile, the store-level guard still keeps
    /// the transition single-shot.
    pub async fn cast_validation(
        &self,
        report: &Report,
        user: &UserId,
        now: DateTime<Utc>,
    ) -> Result<ValidationOutcome> {
        if report.validated {
            return Ok(ValidationOutcome::AlreadyValidated);
        }
        if self.votes.get_validation(&report.id, user).await?.is_some() {
            return Ok(ValidationOutcome::DuplicateVoter);
        }

        self.votes
            .put_validation(ValidationVote::new(report.id.clone(), user.clone(), now))
            .await?;
        let voters = self.votes.count_distinct_voters(&report.id).await?;

        match voters.cmp(&self.config.quorum) {
            Ordering::Less => Ok(ValidationOutcome::Counted { voters }),
            Ordering::Equal => {
                let elapsed = ValidationElapsed::between(report.created_at, now);
                if self.reports.mark_validated(&report.id, now, elapsed).await? {
                    debug!(report = %report.id, voters, %elapsed, "quorum reached, report validated");
                    Ok(ValidationOutcome::QuorumReached { elapsed })
                } else {
                    debug!(report = %report.id, "lost the validated-transition race");
                    Ok(ValidationOutcome::Counted { voters })
                }
            }
            Ordering::Greater => {
                // Each voter passes the duplicate guard at most once, so a
                // count above quorum means that guard or the store's
                // consistency is broken. Surface it; do not transition.
                error!(
                    report = %report.id,
                    voters,
                    quorum = self.config.quorum,
                    "distinct voter count exceeds quorum"
                );
                Ok(ValidationOutcome::Counted { voters })
            }
        }
    }
}
