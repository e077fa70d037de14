/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! The multi-round vote store: the single mutable root of the agreement engine.

use std::collections::{hash_map::Entry, HashMap};

use crate::logging;
use crate::messages::{batch_round, ConflictingVote, Outcome, Vote};
use crate::types::basic::Round;

use super::cleanup::CleanupStrategy;
use super::round_ledger::RoundLedger;

/// Per-round bookkeeping that guarantees a resolved round is gossiped and processed at most once,
/// regardless of how many duplicate inbound messages trigger a re-check.
///
/// The state only ever advances (see
/// [`advance_gossip_state`](AgreementStore::advance_gossip_state)); `SentProcessed` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GossipState {
    /// The round's outcome has neither been broadcast nor acted upon locally.
    #[default]
    NotSentNotProcessed,
    /// The outcome has been broadcast to peers, but not yet acted upon locally.
    SentNotProcessed,
    /// The outcome has been broadcast and acted upon. Terminal.
    SentProcessed,
}

/// Owns every live [RoundLedger] and [GossipState], keyed by round.
///
/// One `AgreementStore` is created at node start and lives for the lifetime of the node; round
/// entries are created lazily (gated by the [CleanupStrategy]) and destroyed by strategy-driven
/// eviction. All state is in memory: on restart the current round is re-derived from the last
/// finalized height by the caller.
///
/// # Concurrency
///
/// [`store`](Self::store), [`remove`](Self::remove) and
/// [`advance_gossip_state`](Self::advance_gossip_state) perform check-then-act sequences and take
/// `&mut self`: exclusive access is enforced by the borrow rule, so a store shared between the
/// local voting logic and inbound peer connections goes behind a lock, with the `&self` probes
/// ([`is_committed`](Self::is_committed), [`gossip_state`](Self::gossip_state)) eligible for the
/// read side of an `RwLock`. Nothing here blocks on I/O; every operation is a synchronous,
/// bounded-time, in-memory computation.
pub struct AgreementStore<S: CleanupStrategy> {
    round_ledgers: HashMap<Round, RoundLedger>,
    gossip_states: HashMap<Round, GossipState>,
    strategy: S,
}

impl<S: CleanupStrategy> AgreementStore<S> {
    pub fn new(strategy: S) -> AgreementStore<S> {
        Self {
            round_ledgers: HashMap::new(),
            gossip_states: HashMap::new(),
            strategy,
        }
    }

    /// Insert a batch of votes, all sharing one round, that has already been admitted at the
    /// boundary (signatures verified, signers checked against the round's peer set).
    ///
    /// `peers_in_round` is the size of the peer-set snapshot for the batch's round; it is used
    /// when this batch is the first sight of its round and a ledger has to be created.
    ///
    /// Returns the round's outcome as soon as one is provable, updating it cumulatively on
    /// subsequent calls. Returns `None` and leaves all state untouched when the batch is empty or
    /// mixes rounds (malformed input), or when the cleanup strategy refuses to open the round;
    /// the latter means "round unknown here, request catch-up from a peer", not an error.
    ///
    /// When the insertion resolves the round, superseded rounds are evicted before returning.
    pub fn store(&mut self, votes: Vec<Vote>, peers_in_round: u64) -> Option<Outcome> {
        if votes.is_empty() {
            logging::log_ignore_batch("empty batch");
            return None;
        }
        let round = match batch_round(&votes) {
            Some(round) => round,
            None => {
                logging::log_ignore_batch("mixed-round batch");
                return None;
            }
        };

        let ledger = match self.round_ledgers.entry(round) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                if !self.strategy.should_create_round(round) {
                    logging::log_refuse_round(&round);
                    return None;
                }
                entry.insert(RoundLedger::new(round, peers_in_round))
            }
        };

        let outcome = ledger.insert(votes)?;

        for superseded in self.strategy.finalize(round, &outcome) {
            self.remove(&superseded);
        }

        Some(outcome)
    }

    /// Whether some candidate has reached supermajority in `round`. False for unknown rounds.
    pub fn is_committed(&self, round: &Round) -> bool {
        self.round_ledgers
            .get(round)
            .map_or(false, |ledger| ledger.committed())
    }

    /// The gossip state of `round`. Unseen rounds report the default
    /// [`NotSentNotProcessed`](GossipState::NotSentNotProcessed); no entry is created by reading.
    pub fn gossip_state(&self, round: &Round) -> GossipState {
        self.gossip_states.get(round).copied().unwrap_or_default()
    }

    /// Advance `round`'s gossip state one step:
    /// `NotSentNotProcessed → SentNotProcessed → SentProcessed → SentProcessed`.
    ///
    /// Idempotent at the terminal state, so duplicate inbound messages can re-trigger the
    /// caller's send-then-process sequence without causing a second broadcast or a second
    /// processing action.
    pub fn advance_gossip_state(&mut self, round: Round) {
        let state = self.gossip_states.entry(round).or_default();
        *state = match *state {
            GossipState::NotSentNotProcessed => GossipState::SentNotProcessed,
            GossipState::SentNotProcessed => GossipState::SentProcessed,
            GossipState::SentProcessed => GossipState::SentProcessed,
        };
        logging::log_advance_gossip_state(&round, *state);
    }

    /// Drop both the round ledger and the gossip state of `round`. Called by strategy-driven
    /// eviction, and by external requests when a height is finalized through another path.
    pub fn remove(&mut self, round: &Round) {
        let removed_ledger = self.round_ledgers.remove(round).is_some();
        let removed_gossip = self.gossip_states.remove(round).is_some();
        if removed_ledger || removed_gossip {
            logging::log_evict_round(round);
        }
    }

    /// Whether a ledger for `round` is currently live.
    pub fn contains_round(&self, round: &Round) -> bool {
        self.round_ledgers.contains_key(round)
    }

    /// Evidence of peers that voted for two different candidates in `round`, accumulated since
    /// the last drain. Surfaced for out-of-band handling; draining does not affect the counts.
    pub fn take_conflicting_votes(&mut self, round: &Round) -> Vec<ConflictingVote> {
        self.round_ledgers
            .get_mut(round)
            .map(|ledger| ledger.take_conflicting_votes())
            .unwrap_or_default()
    }

    /// Read access to a live round's ledger.
    pub fn round_ledger(&self, round: &Round) -> Option<&RoundLedger> {
        self.round_ledgers.get(round)
    }
}
