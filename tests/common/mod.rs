//! Shared helpers for the yac_rs test suite: keypair generation, candidate digests, and vote
//! factories. Cluster sizes are small (4 and 7 peers, i.e., `f = 1` and `f = 2`) so that
//! thresholds are easy to reason about in the test bodies.

pub(crate) mod logging;

use ed25519_dalek::SigningKey;
use rand_core::OsRng;
use sha2::{Digest, Sha256};

use yac_rs::messages::Vote;
use yac_rs::types::{
    basic::{CryptoHash, Round},
    candidate::CandidateHash,
    keypair::Keypair,
    peers::PeerSet,
};

/// Generate `n` fresh signing identities.
pub(crate) fn keypairs(n: usize) -> Vec<Keypair> {
    let mut csprg = OsRng {};
    (0..n)
        .map(|_| Keypair::new(SigningKey::generate(&mut csprg)))
        .collect()
}

/// The peer-set snapshot corresponding to `keypairs`.
pub(crate) fn peer_set(keypairs: &[Keypair]) -> PeerSet {
    keypairs.iter().map(|keypair| keypair.public()).collect()
}

/// A candidate identity derived from human-readable proposal and block labels.
pub(crate) fn candidate(proposal: &str, block: &str) -> CandidateHash {
    CandidateHash::new(sha256(proposal.as_bytes()), sha256(block.as_bytes()))
}

pub(crate) fn sha256(preimage: &[u8]) -> CryptoHash {
    let mut hasher = Sha256::new();
    hasher.update(preimage);
    CryptoHash::new(hasher.finalize().into())
}

/// One vote per keypair, all for the same candidate in the same round.
pub(crate) fn votes_for(
    keypairs: &[Keypair],
    round: Round,
    candidate: CandidateHash,
) -> Vec<Vote> {
    keypairs
        .iter()
        .map(|keypair| Vote::new(keypair, round, candidate))
        .collect()
}
