/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Pure arithmetic over peer counts: supermajority and reject conditions.
//!
//! These four functions are the entire safety argument of the engine. With `N = 3f + 1` or more
//! peers and at most `f` of them Byzantine, two disjoint vote sets each of size `>= 2f + 1`
//! cannot both exist, so at most one candidate per round can ever satisfy [`check_size`]. No
//! extra bookkeeping is needed to keep commits unique.
//!
//! Everything here is stateless and total: no side effects, no error states.

use ed25519_dalek::VerifyingKey;

use crate::types::peers::PeerSet;

/// The supermajority threshold for a cluster of `total` peers: `2f + 1`, where
/// `f = (total - 1) / 3` is the number of Byzantine peers the cluster tolerates.
pub const fn threshold(total: u64) -> u64 {
    let f = total.saturating_sub(1) / 3;
    2 * f + 1
}

/// Whether `current` votes out of `total` peers form a supermajority. False whenever
/// `current > total`: a claimed vote count exceeding the known peer count is never valid.
pub const fn check_size(current: u64, total: u64) -> bool {
    current <= total && current >= threshold(total)
}

/// Whether a reject is provable: even if every still-silent peer voted for the currently-leading
/// candidate, supermajority would not be reached.
///
/// `most_frequent` is the vote count of the leading candidate, `voted` the number of distinct
/// peers that have voted for any candidate (`voted <= total`, enforced upstream by per-signer
/// deduplication against the round's peer set).
pub const fn has_reject(most_frequent: u64, voted: u64, total: u64) -> bool {
    let not_voted = total.saturating_sub(voted);
    !check_size(most_frequent + not_voted, total)
}

/// Whether every signer identity is a member of `peers`. Applied by the transport layer before
/// admitting votes, together with signature verification: votes from unknown identities never
/// reach the ledgers.
pub fn peers_subset<'a>(
    signers: impl IntoIterator<Item = &'a VerifyingKey>,
    peers: &PeerSet,
) -> bool {
    signers.into_iter().all(|signer| peers.contains(signer))
}
