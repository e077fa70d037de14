/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Functions that log out storage events.
//!
//! yac_rs logs using the [log](https://docs.rs/log/latest/log/) crate. To get these messages
//! printed onto a terminal or to a file, set up a
//! [logging implementation](https://docs.rs/log/latest/log/#available-logging-implementations).
//!
//! ## Log message format
//!
//! Log messages are CSVs (Comma Separated Values) with at least two values. The first two values
//! are always:
//! 1. The name of the event in PascalCase (defined in this module as constants).
//! 2. The time the event was emitted (as number of seconds since the Unix Epoch).
//!
//! The rest of the values differ depending on the kind of event. For example, the following
//! snippet is how a collected commit is printed:
//!
//! ```text
//! CollectCommit, 1701329264, (2, 0), fNGCJyk, 5
//! ```
//!
//! In the snippet:
//! - The third value is the round, as a `(block_round, reject_round)` pair.
//! - The fourth value is the first seven characters of the Base64 encoding of the committed
//!   candidate's block hash.
//! - The fifth value is the number of votes backing the commit so far.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use ed25519_dalek::VerifyingKey;
use std::time::SystemTime;

use crate::storage::GossipState;
use crate::types::{basic::Round, candidate::CandidateHash};

// Names of each event in PascalCase for printing:
pub const COLLECT_COMMIT: &str = "CollectCommit";
pub const COLLECT_REJECT: &str = "CollectReject";
pub const EVICT_ROUND: &str = "EvictRound";
pub const REFUSE_ROUND: &str = "RefuseRound";
pub const CONFLICTING_VOTE: &str = "ConflictingVote";
pub const ADVANCE_GOSSIP_STATE: &str = "AdvanceGossipState";
pub const IGNORE_BATCH: &str = "IgnoreBatch";

pub(crate) fn log_collect_commit(round: &Round, candidate: &CandidateHash, votes: usize) {
    log::info!(
        "{}, {}, {}, {}, {}",
        COLLECT_COMMIT,
        now(),
        round,
        first_seven_base64_chars(&candidate.block.bytes()),
        votes,
    )
}

pub(crate) fn log_collect_reject(round: &Round, votes: usize) {
    log::info!("{}, {}, {}, {}", COLLECT_REJECT, now(), round, votes)
}

pub(crate) fn log_evict_round(round: &Round) {
    log::info!("{}, {}, {}", EVICT_ROUND, now(), round)
}

pub(crate) fn log_refuse_round(round: &Round) {
    log::info!("{}, {}, {}", REFUSE_ROUND, now(), round)
}

pub(crate) fn log_conflicting_vote(
    round: &Round,
    signer: &VerifyingKey,
    existing: &CandidateHash,
    conflicting: &CandidateHash,
) {
    log::warn!(
        "{}, {}, {}, {}, {}, {}",
        CONFLICTING_VOTE,
        now(),
        round,
        first_seven_base64_chars(&signer.to_bytes()),
        first_seven_base64_chars(&existing.block.bytes()),
        first_seven_base64_chars(&conflicting.block.bytes()),
    )
}

pub(crate) fn log_advance_gossip_state(round: &Round, state: GossipState) {
    log::info!(
        "{}, {}, {}, {:?}",
        ADVANCE_GOSSIP_STATE,
        now(),
        round,
        state,
    )
}

pub(crate) fn log_ignore_batch(reason: &str) {
    log::debug!("{}, {}, {}", IGNORE_BATCH, now(), reason)
}

// Get a more readable representation of a bytesequence by base64-encoding it and taking the first
// 7 characters.
fn first_seven_base64_chars(bytes: &[u8]) -> String {
    let encoded = STANDARD_NO_PAD.encode(bytes);
    if encoded.len() > 7 {
        encoded[0..7].to_string()
    } else {
        encoded
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .expect("Event occured before the Unix Epoch.")
        .as_secs()
}
