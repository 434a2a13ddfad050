//! Cross-crate scenario tests for the Vigil core.
//!
//! The real tests live under `tests/`; this crate exists so the
//! workspace has one member that exercises the whole pipeline — feeds,
//! session, engine, ledger, quorum — against the shared in-memory store.
