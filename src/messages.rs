/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Signed votes and the two provable outcomes a round can resolve to.
//!
//! This crate has no wire format of its own: the transport layer deserializes peer messages into
//! [`Vote`]s, verifies each vote with [`SignedMessage::is_correct`] and
//! [`peers_subset`](crate::supermajority::peers_subset), and only then hands the batch to
//! [`AgreementStore::store`](crate::storage::AgreementStore::store).

use borsh::BorshSerialize;

pub use ed25519_dalek::{Signature, SigningKey, Verifier, VerifyingKey};

use crate::types::{
    basic::{Round, SignatureBytes},
    candidate::CandidateHash,
    keypair::Keypair,
};

/// Data types that contain: 1. A message, and 2. A digital signature over said message whose
/// correctness can be verified against a `VerifyingKey`.
pub trait SignedMessage: Clone {
    /// Get the bytes that are passed as input into the signing function to form the signature
    /// of the `SignedMessage`.
    fn message_bytes(&self) -> Vec<u8>;

    /// Get the signature of the `SignedMessage`.
    fn signature_bytes(&self) -> SignatureBytes;

    /// Verify that `signature_bytes` is a signature created by `verifying_key` over
    /// `message_bytes`.
    fn is_correct(&self, verifying_key: &VerifyingKey) -> bool {
        let signature = Signature::from_bytes(&self.signature_bytes().bytes());
        verifying_key
            .verify(&self.message_bytes(), &signature)
            .is_ok()
    }
}

/// A single peer's support for a [candidate](CandidateHash) in a [round](Round).
///
/// A vote is immutable once admitted. Its deduplication key is `(round, signer)`: the same peer
/// re-sending the same vote is a no-op, while the same peer signing a *different* candidate in the
/// same round is a protocol violation that the storage layer surfaces as a [`ConflictingVote`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vote {
    pub round: Round,
    pub candidate: CandidateHash,
    pub signer: VerifyingKey,
    pub signature: SignatureBytes,
}

impl Vote {
    /// Author the local node's own vote for `candidate` in `round`, signing `(round, candidate)`.
    pub fn new(me: &Keypair, round: Round, candidate: CandidateHash) -> Vote {
        let message_bytes = (round, candidate)
            .try_to_vec()
            .expect("borsh encoding of (round, candidate) is infallible");
        let signature = me.sign(&message_bytes);

        Vote {
            round,
            candidate,
            signer: me.public(),
            signature,
        }
    }
}

impl SignedMessage for Vote {
    fn message_bytes(&self) -> Vec<u8> {
        (self.round, self.candidate)
            .try_to_vec()
            .expect("borsh encoding of (round, candidate) is infallible")
    }

    fn signature_bytes(&self) -> SignatureBytes {
        self.signature
    }
}

/// Proof that a supermajority of the round's peers voted for one candidate.
///
/// The contained votes are duplicate-free, all share the same `(round, candidate)`, and number at
/// least [`threshold`](crate::supermajority::threshold) of the round's peers. The proof keeps
/// growing as further distinct votes for the committed candidate arrive, so late queries observe a
/// fuller certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitOutcome {
    pub votes: Vec<Vote>,
}

impl CommitOutcome {
    /// The candidate this proof commits. `None` only for an empty (and therefore invalid) proof.
    pub fn candidate(&self) -> Option<CandidateHash> {
        self.votes.first().map(|vote| vote.candidate)
    }
}

/// Proof that no candidate can reach supermajority in its round, even if every still-silent peer
/// were to vote for the current leader.
///
/// Carries every vote observed in the round across all candidates, as a replayable artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectOutcome {
    pub votes: Vec<Vote>,
}

/// The resolution of a round. Matched explicitly by the caller: a commit drives block
/// finalization, a reject advances the cluster to
/// [`Round::next_reject_round`](crate::types::basic::Round::next_reject_round).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Commit(CommitOutcome),
    Reject(RejectOutcome),
}

impl Outcome {
    pub fn is_commit(&self) -> bool {
        matches!(self, Outcome::Commit(_))
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, Outcome::Reject(_))
    }

    /// All votes backing this outcome.
    pub fn votes(&self) -> &[Vote] {
        match self {
            Outcome::Commit(commit) => &commit.votes,
            Outcome::Reject(reject) => &reject.votes,
        }
    }
}

/// Evidence that one signer voted for two different candidates within the same round.
///
/// The core does not adjudicate this: both votes stay counted in their respective candidate
/// ledgers, and the pair is surfaced for out-of-band handling (e.g., peer penalization).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictingVote {
    pub existing: Vote,
    pub conflicting: Vote,
}

impl ConflictingVote {
    pub fn signer(&self) -> &VerifyingKey {
        &self.existing.signer
    }
}

/// Whether all votes in `votes` are about the same round. Vacuously true for an empty slice.
pub fn same_round(votes: &[Vote]) -> bool {
    votes
        .windows(2)
        .all(|pair| pair[0].round == pair[1].round)
}

/// The round a batch is about: `Some` iff the batch is non-empty and internally consistent.
pub fn batch_round(votes: &[Vote]) -> Option<Round> {
    if same_round(votes) {
        votes.first().map(|vote| vote.round)
    } else {
        None
    }
}
