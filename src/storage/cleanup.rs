/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Policies that bound how many rounds' state is retained in memory at once.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::messages::Outcome;
use crate::types::basic::Round;

/// Decides whether a round may be opened, and which rounds to evict once a round resolves.
///
/// The [AgreementStore](crate::storage::store::AgreementStore) consults this at the two points
/// where the set of live rounds changes: on first sight of a round's votes, and on a round
/// producing an [Outcome]. Memory is bounded structurally by this policy, never by raising
/// errors.
pub trait CleanupStrategy {
    /// Whether a ledger for `round` may be created. A refusal means "round unknown" to the
    /// caller, which should request catch-up state from a peer rather than treat it as an error.
    fn should_create_round(&mut self, round: Round) -> bool;

    /// Note that `round` resolved with `outcome`, and return the rounds whose state is now
    /// superseded and must be evicted.
    fn finalize(&mut self, round: Round, outcome: &Outcome) -> Vec<Round>;
}

/// The default policy: keep rounds buffered until a commit supersedes them.
///
/// Tracks two watermarks: the highest committed round and the highest rejected round. A commit
/// at round R evicts every created round ordered strictly before R (their outcomes can never
/// matter again). A reject evicts nothing: the rejected round keeps serving its reject proof to
/// lagging peers until a later commit supersedes it.
#[derive(Default)]
pub struct BufferedCleanup {
    // Every round that creation was ever requested for, smallest first.
    created_rounds: BinaryHeap<Reverse<Round>>,
    // Highest rejected round; cleared when a later commit makes previous rejects irrelevant.
    last_reject_round: Option<Round>,
    // Highest committed round.
    last_commit_round: Option<Round>,
}

impl BufferedCleanup {
    pub fn new() -> BufferedCleanup {
        Self::default()
    }

    // Drain every created round ordered strictly before the commit watermark.
    fn truncate_created_rounds(&mut self) -> Vec<Round> {
        let mut removed = Vec::new();
        if let Some(last_commit) = self.last_commit_round {
            while let Some(&Reverse(lowest)) = self.created_rounds.peek() {
                if lowest >= last_commit {
                    break;
                }
                self.created_rounds.pop();
                removed.push(lowest);
            }
        }
        removed
    }

    // The lowest of the two watermarks, if any is set. Rounds below this can never become
    // relevant again.
    fn minimal_round(&self) -> Option<Round> {
        match (self.last_commit_round, self.last_reject_round) {
            (Some(commit), Some(reject)) => Some(commit.min(reject)),
            (Some(commit), None) => Some(commit),
            (None, Some(reject)) => Some(reject),
            (None, None) => None,
        }
    }
}

impl CleanupStrategy for BufferedCleanup {
    fn should_create_round(&mut self, round: Round) -> bool {
        let should_create = match self.minimal_round() {
            Some(min_round) => min_round <= round,
            None => true,
        };
        self.created_rounds.push(Reverse(round));
        should_create
    }

    fn finalize(&mut self, round: Round, outcome: &Outcome) -> Vec<Round> {
        let target_round = match outcome {
            Outcome::Commit(_) => {
                // A commit newer than the last reject retires the reject watermark: previous
                // rejects are not required for the consensus anymore.
                if let (Some(commit), Some(reject)) =
                    (self.last_commit_round, self.last_reject_round)
                {
                    if commit < reject {
                        self.last_reject_round = None;
                    }
                }
                &mut self.last_commit_round
            }
            Outcome::Reject(_) => &mut self.last_reject_round,
        };

        let raised = match *target_round {
            Some(target) if target >= round => target,
            _ => round,
        };
        *target_round = Some(raised);

        self.truncate_created_rounds()
    }
}
