/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The vote storage subsystem: per-candidate ledgers, per-round aggregation, the multi-round
//! store, and the cleanup policies that bound it.
//!
//! ## Ownership, leaves first
//!
//! - [CandidateLedger](candidate_ledger::CandidateLedger) accumulates votes for one
//!   `(round, candidate)` pair and detects commit.
//! - [RoundLedger](round_ledger::RoundLedger) owns the candidate ledgers of a single round and
//!   detects reject across them.
//! - [AgreementStore](store::AgreementStore) owns every live round ledger, keyed by round,
//!   applies a [CleanupStrategy](cleanup::CleanupStrategy) to bound memory, and tracks per-round
//!   [GossipState](store::GossipState).
//!
//! ## Driving loop
//!
//! Inbound votes (already signature-verified and peer-checked at the boundary) are handed to
//! [`AgreementStore::store`](store::AgreementStore::store), which returns the round's
//! [`Outcome`](crate::messages::Outcome) as soon as one is provable. The caller forwards a commit
//! to its block-finalization sink and a reject to its next-attempt logic, using the gossip state
//! machine to broadcast and process each resolved round at most once. The caller's periodic
//! rebroadcast timer simply re-invokes `store` with the local vote until the round resolves or is
//! evicted.

pub mod candidate_ledger;

pub mod round_ledger;

pub mod cleanup;

pub mod store;

pub use candidate_ledger::CandidateLedger;
pub use cleanup::{BufferedCleanup, CleanupStrategy};
pub use round_ledger::RoundLedger;
pub use store::{AgreementStore, GossipState};
