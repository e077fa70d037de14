/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Vote accumulation for a single `(round, candidate)` pair.

use ed25519_dalek::VerifyingKey;

use crate::messages::{CommitOutcome, Vote};
use crate::supermajority;
use crate::types::{basic::Round, candidate::CandidateHash};

/// Serves to incrementally form a [CommitOutcome] by accumulating votes for one candidate from
/// the peers of one round.
///
/// Votes are deduplicated by signer: the first vote a signer contributes is kept, any identical
/// re-send is a no-op. Votes for a different round or candidate never enter this ledger (the
/// [round ledger](crate::storage::round_ledger::RoundLedger) routes them), but are also rejected
/// here so that a misrouted vote cannot corrupt the count.
pub struct CandidateLedger {
    round: Round,
    candidate: CandidateHash,
    peers_in_round: u64,
    // Admitted votes in insertion order.
    votes: Vec<Vote>,
}

impl CandidateLedger {
    pub fn new(round: Round, candidate: CandidateHash, peers_in_round: u64) -> CandidateLedger {
        Self {
            round,
            candidate,
            peers_in_round,
            votes: Vec::new(),
        }
    }

    /// Insert `vote`, then report the ledger's current state.
    ///
    /// Returns `Some(CommitOutcome)` containing **all** accumulated votes whenever the ledger
    /// holds a supermajority, not only on the insertion that crosses the threshold. Every
    /// qualifying insertion after the first commit therefore returns an updated, larger proof,
    /// which lets late-joining peers retrieve a fuller certificate by resubmitting state.
    ///
    /// Inserting a duplicate, or a vote for a foreign round or candidate, changes nothing and
    /// returns the last-known state unchanged.
    pub fn insert(&mut self, vote: Vote) -> Option<CommitOutcome> {
        if self.accepts(&vote) && !self.contains(&vote.signer) {
            self.votes.push(vote);
        }
        self.state()
    }

    /// The current state of this ledger: `Some` iff the accumulated votes form a supermajority.
    pub fn state(&self) -> Option<CommitOutcome> {
        if self.committed() {
            Some(CommitOutcome {
                votes: self.votes.clone(),
            })
        } else {
            None
        }
    }

    /// Whether this ledger has reached (and therefore permanently holds) supermajority support.
    pub fn committed(&self) -> bool {
        supermajority::check_size(self.len() as u64, self.peers_in_round)
    }

    /// Whether a vote from `signer` has been admitted.
    pub fn contains(&self, signer: &VerifyingKey) -> bool {
        self.votes.iter().any(|vote| &vote.signer == signer)
    }

    /// The vote `signer` contributed, if any.
    pub fn vote_of(&self, signer: &VerifyingKey) -> Option<&Vote> {
        self.votes.iter().find(|vote| &vote.signer == signer)
    }

    /// Admitted votes, in insertion order.
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn candidate(&self) -> &CandidateHash {
        &self.candidate
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    fn accepts(&self, vote: &Vote) -> bool {
        vote.round == self.round && vote.candidate == self.candidate
    }
}
