//! Vigil Store Seam
//!
//! The consensus components never talk to the backend directly; they go
//! through the async traits in this crate. The real product binds them to
//! a remote document store, tests and simulations bind them to
//! [`MemoryStore`].
//!
//! # Consistency Expectations
//!
//! No transactional multi-key guarantee is assumed anywhere. The one
//! capability the traits *do* require is [`ReportWriter::mark_validated`]
//! being conditional: "set validated only if currently false", reporting
//! whether this call performed the transition. A plain last-write-wins
//! merge cannot implement that contract and is not an acceptable binding.
//!
//! # Failure Policy
//!
//! Every operation can fail with [`StoreError`]. Errors propagate to the
//! caller untouched; retry and backoff are the caller's policy, not the
//! store's.

mod error;
mod memory;
mod store;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use store::{ReportWriter, ValidationStore, VoteStore};
