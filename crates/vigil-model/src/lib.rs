//! Vigil Domain Model
//!
//! Shared data types for the incident-reporting core: reports and their
//! lifecycle, device position fixes, and the two kinds of votes.
//!
//! Reports are owned by the backend store; clients only read snapshots and
//! derive decisions from them. The two vote types differ deliberately:
//! a [`Vote`] (up/down) is a mutable single slot per (report, user), while
//! a [`ValidationVote`] is write-once — there is no revocation path for
//! validation in this design.

mod elapsed;
mod position;
mod report;
mod vote;

pub use elapsed::ValidationElapsed;
pub use position::Position;
pub use report::{Report, ReportCategory, ReportId, ReportStatus, UnknownCategory};
pub use vote::{Tally, UserId, ValidationVote, Vote, VoteChoice};
