//! Single-slot vote ledger with toggle/replace semantics.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;
use vigil_model::{ReportId, UserId, Vote, VoteChoice};
use vigil_store::{Result, VoteStore};

/// What a cast should do to the slot, given what is already there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDecision {
    /// Empty slot: write the requested choice.
    Set,
    /// Same choice already present: clear the slot.
    ToggleOff,
    /// Opposite choice present: replace it.
    Replace,
}

/// Pure decision function for a cast against the current slot contents.
///
/// Re-clicking your own vote clears it; clicking the other direction
/// replaces it. Running the same cast twice from the resulting state
/// cycles set → toggled-off → set.
pub fn decide(existing: Option<VoteChoice>, requested: VoteChoice) -> VoteDecision {
    match existing {
        None => VoteDecision::Set,
        Some(current) if current == requested => VoteDecision::ToggleOff,
        Some(_) => VoteDecision::Replace,
    }
}

/// How a cast landed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    /// A new vote was written.
    Set,
    /// The user's existing identical vote was removed.
    ToggledOff,
    /// The user's opposite vote was replaced.
    Replaced,
}

/// Storage adapter applying [`decide`] against a [`VoteStore`].
///
/// The read-modify-write spans two awaits, so two rapid taps on the same
/// slot could interleave and lose an update. Casts for the same
/// (report, user) slot therefore queue on a per-slot async mutex; casts
/// for different slots do not contend. The guard table is scoped to this
/// ledger instance (one per client session) and bounded by the slots the
/// user has touched.
pub struct VoteLedger<S> {
    store: Arc<S>,
    in_flight: DashMap<(ReportId, UserId), Arc<Mutex<()>>>,
}

impl<S: VoteStore> VoteLedger<S> {
    /// Ledger over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            in_flight: DashMap::new(),
        }
    }

    /// Cast a vote: set, toggle off, or replace, per [`decide`].
    pub async fn cast_vote(
        &self,
        report: &ReportId,
        user: &UserId,
        choice: VoteChoice,
    ) -> Result<VoteOutcome> {
        let slot = (report.clone(), user.clone());
        let guard = self
            .in_flight
            .entry(slot)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        let _serialized = guard.lock().await;

        let existing = self.store.get_vote(report, user).await?.map(|v| v.choice);
        let outcome = match decide(existing, choice) {
            VoteDecision::Set => {
                self.store
                    .put_vote(Vote::new(report.clone(), user.clone(), choice))
                    .await?;
                VoteOutcome::Set
            }
            VoteDecision::ToggleOff => {
                self.store.delete_vote(report, user).await?;
                VoteOutcome::ToggledOff
            }
            VoteDecision::Replace => {
                self.store.delete_vote(report, user).await?;
                self.store
                    .put_vote(Vote::new(report.clone(), user.clone(), choice))
                    .await?;
                VoteOutcome::Replaced
            }
        };

        debug!(%report, %user, ?choice, ?outcome, "vote cast");
        Ok(outcome)
    }
}
