//! Vigil Consensus
//!
//! Exactly-once agreement over an eventually-consistent, multi-writer
//! document store, with no central lock.
//!
//! Two components share that problem:
//!
//! - [`VoteLedger`] — one up/down slot per (report, user) with
//!   toggle/replace/remove semantics. The slot key itself prevents
//!   cross-user races; the ledger serializes the *same* client's rapid
//!   re-taps so a double-tap cannot lose an update.
//! - [`ValidationQuorum`] — distinct users affirm a report; the vote that
//!   brings the count to quorum transitions the report to validated,
//!   exactly once, through the store's conditional write.
//!
//! Both re-derive every decision from current store state instead of
//! assuming delivery order, and both propagate store failures to the
//! caller untouched — retry policy lives above this crate.

mod ballot;
mod quorum;

pub use ballot::{decide, VoteDecision, VoteLedger, VoteOutcome};
pub use quorum::{QuorumConfig, ValidationOutcome, ValidationQuorum, VALIDATION_QUORUM};
