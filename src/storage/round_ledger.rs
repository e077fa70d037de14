/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Aggregation of the competing candidates of a single round.

use std::collections::{hash_map::Entry, HashMap, HashSet};

use ed25519_dalek::VerifyingKey;

use crate::logging;
use crate::messages::{ConflictingVote, Outcome, RejectOutcome, Vote};
use crate::supermajority;
use crate::types::{basic::Round, candidate::CandidateHash};

use super::candidate_ledger::CandidateLedger;

/// Multiplexes the [CandidateLedger]s of one round and detects the two ways the round can
/// resolve:
/// - **Commit**: some candidate's ledger reaches supermajority.
/// - **Reject**: it becomes provable that no candidate can reach supermajority, even counting
///   every still-silent peer towards the current leader.
///
/// Multiple candidates coexist because reject attempts let peers vote for different proposals,
/// and because Byzantine peers may vote for anything. Candidate ledgers are created lazily on
/// first sight of a new candidate.
pub struct RoundLedger {
    round: Round,
    peers_in_round: u64,
    candidate_ledgers: HashMap<CandidateHash, CandidateLedger>,
    // Evidence of signers that voted for two different candidates in this round. Held for the
    // caller; the ledgers themselves keep counting both votes.
    conflicting_votes: Vec<ConflictingVote>,
}

impl RoundLedger {
    pub fn new(round: Round, peers_in_round: u64) -> RoundLedger {
        Self {
            round,
            peers_in_round,
            candidate_ledgers: HashMap::new(),
            conflicting_votes: Vec::new(),
        }
    }

    /// Insert a batch of votes, all of which must be about this ledger's round (votes for a
    /// foreign round are skipped defensively).
    ///
    /// If any insertion completes a commit, the commit is propagated immediately: the round is
    /// decided and no reject check is needed. Otherwise the reject condition is recomputed across
    /// all candidates; a provable reject carries the union of every vote seen in the round as its
    /// proof artifact. Returns `None` while the round remains open.
    pub fn insert(&mut self, votes: Vec<Vote>) -> Option<Outcome> {
        let mut commit = None;
        for vote in votes {
            if vote.round != self.round {
                logging::log_ignore_batch("vote for foreign round");
                continue;
            }

            self.record_conflict(&vote);

            let ledger = match self.candidate_ledgers.entry(vote.candidate) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(CandidateLedger::new(
                    self.round,
                    vote.candidate,
                    self.peers_in_round,
                )),
            };
            if let Some(collected) = ledger.insert(vote) {
                commit = Some(collected);
            }
        }

        if let Some(commit) = commit {
            logging::log_collect_commit(
                &self.round,
                &commit.candidate().expect("a commit holds at least threshold > 0 votes"),
                commit.votes.len(),
            );
            return Some(Outcome::Commit(commit));
        }

        if supermajority::has_reject(self.most_frequent(), self.voted(), self.peers_in_round) {
            let votes = self.all_votes();
            logging::log_collect_reject(&self.round, votes.len());
            return Some(Outcome::Reject(RejectOutcome { votes }));
        }

        None
    }

    /// Whether some candidate in this round has reached supermajority.
    pub fn committed(&self) -> bool {
        self.candidate_ledgers
            .values()
            .any(|ledger| ledger.committed())
    }

    /// Whether this round has resolved, either way.
    pub fn decided(&self) -> bool {
        self.committed()
            || supermajority::has_reject(self.most_frequent(), self.voted(), self.peers_in_round)
    }

    /// The union of every vote observed in this round, across all candidates.
    pub fn all_votes(&self) -> Vec<Vote> {
        self.candidate_ledgers
            .values()
            .flat_map(|ledger| ledger.votes().iter().cloned())
            .collect()
    }

    /// Evidence of signers that voted for two different candidates in this round.
    pub fn conflicting_votes(&self) -> &[ConflictingVote] {
        &self.conflicting_votes
    }

    pub fn take_conflicting_votes(&mut self) -> Vec<ConflictingVote> {
        std::mem::take(&mut self.conflicting_votes)
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn peers_in_round(&self) -> u64 {
        self.peers_in_round
    }

    // Vote count of the currently-leading candidate.
    fn most_frequent(&self) -> u64 {
        self.candidate_ledgers
            .values()
            .map(|ledger| ledger.len() as u64)
            .max()
            .unwrap_or(0)
    }

    // Number of distinct peers that voted for any candidate. A signer that voted for two
    // candidates is counted once.
    fn voted(&self) -> u64 {
        let voters: HashSet<&VerifyingKey> = self
            .candidate_ledgers
            .values()
            .flat_map(|ledger| ledger.votes().iter().map(|vote| &vote.signer))
            .collect();
        voters.len() as u64
    }

    // If `vote`'s signer already supports a different candidate in this round, and `vote` is the
    // signer's first vote for its own candidate, record the pair as evidence. Checked before the
    // vote is admitted so that re-sends of an already-recorded conflict stay silent.
    fn record_conflict(&mut self, vote: &Vote) {
        let already_admitted = self
            .candidate_ledgers
            .get(&vote.candidate)
            .map_or(false, |ledger| ledger.contains(&vote.signer));
        if already_admitted {
            return;
        }

        let existing = self
            .candidate_ledgers
            .values()
            .filter(|ledger| ledger.candidate() != &vote.candidate)
            .find_map(|ledger| ledger.vote_of(&vote.signer));

        if let Some(existing) = existing {
            logging::log_conflicting_vote(
                &self.round,
                &vote.signer,
                &existing.candidate,
                &vote.candidate,
            );
            self.conflicting_votes.push(ConflictingVote {
                existing: existing.clone(),
                conflicting: vote.clone(),
            });
        }
    }
}
