/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! yac_rs is the Byzantine-fault-tolerant agreement engine of a permissioned-ledger node. Round
//! by round, it decides which single candidate outcome (a proposed block) the cluster commits,
//! and proves when no candidate can ever reach agreement in a round (a reject).
//!
//! ## The protocol in one paragraph
//!
//! Peers vote for a [candidate](types::candidate::CandidateHash) in a
//! [round](types::basic::Round). A candidate that collects votes from a
//! [supermajority](supermajority::threshold) (`2f + 1` out of `N = 3f + 1` peers, tolerating up
//! to `f` Byzantine peers) is committed, and two disjoint supermajorities cannot coexist, so at
//! most one candidate per round ever commits. If the votes split such that even every
//! still-silent peer could not push the leading candidate over the threshold, the round is
//! provably rejected and the cluster moves to the
//! [next reject attempt](types::basic::Round::next_reject_round) at the same height.
//!
//! ## What this crate is, and is not
//!
//! This crate is the agreement core only: the vote arithmetic ([supermajority]), the vote and
//! outcome types ([messages]), and the vote storage with its memory-bounding and
//! gossip-deduplication machinery ([storage]). Peer-to-peer transport, wire formats,
//! cryptographic admission of inbound votes, block storage, transaction ordering, and process
//! bootstrap are the caller's concern; this crate exposes the primitives they need
//! ([`SignedMessage::is_correct`](messages::SignedMessage::is_correct),
//! [`peers_subset`](supermajority::peers_subset)) and otherwise stays runtime-free: every call is
//! synchronous and in-memory, and outcomes are plain return values for the caller to push onto
//! whatever channel or task queue its runtime uses.

pub mod types;

pub mod messages;

pub mod supermajority;

pub mod storage;

pub mod logging;
