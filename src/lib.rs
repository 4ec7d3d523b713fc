//! Single-writer, in-memory proof-of-work ledger.
//!
//! Blocks are built as [`blockchain::Candidate`]s, sealed by a brute-force
//! nonce search, and appended to a [`blockchain::Blockchain`] that checks
//! digests and predecessor links.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod demo;
