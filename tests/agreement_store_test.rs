//! Tests for [AgreementStore]: the store/locate/create flow, strategy-driven eviction, the
//! gossip state machine, and the decided-round probes.

mod common;

use log::LevelFilter;

use yac_rs::messages::{Outcome, Vote};
use yac_rs::storage::{AgreementStore, BufferedCleanup, GossipState};
use yac_rs::types::basic::Round;

fn store() -> AgreementStore<BufferedCleanup> {
    AgreementStore::new(BufferedCleanup::new())
}

#[test]
fn store_collects_a_cumulative_commit() {
    common::logging::setup_logger(LevelFilter::Trace);

    let keypairs = common::keypairs(4);
    let round = Round::new(1, 0);
    let candidate = common::candidate("proposal", "commit");
    let votes = common::votes_for(&keypairs, round, candidate);
    let mut store = store();

    // A batch of 3 out of 4 peers is already a supermajority.
    match store.store(votes[..3].to_vec(), 4) {
        Some(Outcome::Commit(commit)) => assert_eq!(commit.votes.len(), 3),
        other => panic!("expected a commit, got {:?}", other),
    }
    assert!(store.is_committed(&round));

    // The late fourth vote grows the proof.
    match store.store(vec![votes[3].clone()], 4) {
        Some(Outcome::Commit(commit)) => assert_eq!(commit.votes.len(), 4),
        other => panic!("expected a commit, got {:?}", other),
    }
}

#[test]
fn empty_and_mixed_batches_are_ignored() {
    let keypairs = common::keypairs(4);
    let candidate = common::candidate("proposal", "commit");
    let mut store = store();

    assert_eq!(store.store(Vec::new(), 4), None);

    let mixed = vec![
        Vote::new(&keypairs[0], Round::new(1, 0), candidate),
        Vote::new(&keypairs[1], Round::new(1, 1), candidate),
    ];
    assert_eq!(store.store(mixed, 4), None);
    assert!(!store.contains_round(&Round::new(1, 0)));
    assert!(!store.contains_round(&Round::new(1, 1)));
}

#[test]
fn commit_evicts_superseded_rounds() {
    common::logging::setup_logger(LevelFilter::Trace);

    let keypairs = common::keypairs(4);
    let candidate = common::candidate("proposal", "commit");
    let mut store = store();

    // Open two rounds that stay undecided.
    let early = Round::new(1, 0);
    let late = Round::new(1, 1);
    assert_eq!(
        store.store(vec![Vote::new(&keypairs[0], early, candidate)], 4),
        None
    );
    assert_eq!(
        store.store(vec![Vote::new(&keypairs[1], late, candidate)], 4),
        None
    );
    assert!(store.contains_round(&early) && store.contains_round(&late));

    // A commit at the next height supersedes everything ordered before it.
    let committed = Round::new(2, 0);
    let votes = common::votes_for(&keypairs[..3], committed, candidate);
    assert!(store.store(votes, 4).is_some());

    assert!(!store.contains_round(&early));
    assert!(!store.contains_round(&late));
    assert!(store.contains_round(&committed));
}

#[test]
fn stale_rounds_are_refused_after_a_commit() {
    let keypairs = common::keypairs(4);
    let candidate = common::candidate("proposal", "commit");
    let mut store = store();

    let committed = Round::new(2, 0);
    let votes = common::votes_for(&keypairs[..3], committed, candidate);
    assert!(store.store(votes, 4).is_some());

    // Rounds ordered before the commit are not opened: the caller should request catch-up
    // instead.
    let stale = Round::new(1, 5);
    assert_eq!(
        store.store(vec![Vote::new(&keypairs[0], stale, candidate)], 4),
        None
    );
    assert!(!store.contains_round(&stale));

    // Rounds at or after the commit still open normally.
    let fresh = Round::new(3, 0);
    assert_eq!(
        store.store(vec![Vote::new(&keypairs[0], fresh, candidate)], 4),
        None
    );
    assert!(store.contains_round(&fresh));
}

#[test]
fn reject_retires_nothing() {
    common::logging::setup_logger(LevelFilter::Trace);

    let keypairs = common::keypairs(7);
    let round = Round::new(1, 0);
    let candidate_a = common::candidate("proposal", "commit");
    let candidate_b = common::candidate("proposal", "other_commit");
    let mut store = store();

    let mut votes: Vec<Vote> = keypairs[..3]
        .iter()
        .map(|keypair| Vote::new(keypair, round, candidate_a))
        .collect();
    votes.extend(
        keypairs[3..6]
            .iter()
            .map(|keypair| Vote::new(keypair, round, candidate_b)),
    );

    match store.store(votes, 7) {
        Some(Outcome::Reject(reject)) => assert_eq!(reject.votes.len(), 6),
        other => panic!("expected a reject, got {:?}", other),
    }

    // The rejected round stays live, serving its proof until a commit supersedes it.
    assert!(store.contains_round(&round));
    assert!(!store.is_committed(&round));

    // And the next reject attempt opens normally.
    let next = round.next_reject_round();
    assert_eq!(
        store.store(vec![Vote::new(&keypairs[0], next, candidate_a)], 7),
        None
    );
    assert!(store.contains_round(&next));
}

#[test]
fn gossip_state_advances_monotonically() {
    let round = Round::new(1, 0);
    let mut store = store();

    assert_eq!(store.gossip_state(&round), GossipState::NotSentNotProcessed);

    store.advance_gossip_state(round);
    assert_eq!(store.gossip_state(&round), GossipState::SentNotProcessed);

    store.advance_gossip_state(round);
    assert_eq!(store.gossip_state(&round), GossipState::SentProcessed);

    // Terminal and idempotent: duplicate triggers cannot un-process a round.
    store.advance_gossip_state(round);
    store.advance_gossip_state(round);
    assert_eq!(store.gossip_state(&round), GossipState::SentProcessed);
}

#[test]
fn remove_drops_ledger_and_gossip_state() {
    let keypairs = common::keypairs(4);
    let round = Round::new(1, 0);
    let candidate = common::candidate("proposal", "commit");
    let mut store = store();

    store.store(vec![Vote::new(&keypairs[0], round, candidate)], 4);
    store.advance_gossip_state(round);
    assert!(store.contains_round(&round));

    store.remove(&round);
    assert!(!store.contains_round(&round));
    assert_eq!(store.gossip_state(&round), GossipState::NotSentNotProcessed);
}

#[test]
fn conflicting_votes_are_drained_through_the_store() {
    let keypairs = common::keypairs(7);
    let round = Round::new(1, 0);
    let candidate_a = common::candidate("proposal", "commit");
    let candidate_b = common::candidate("proposal", "other_commit");
    let mut store = store();

    store.store(vec![Vote::new(&keypairs[0], round, candidate_a)], 7);
    store.store(vec![Vote::new(&keypairs[0], round, candidate_b)], 7);

    let conflicts = store.take_conflicting_votes(&round);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].signer(), &keypairs[0].public());

    // Draining is destructive; a second drain is empty.
    assert!(store.take_conflicting_votes(&round).is_empty());

    // Unknown rounds drain to nothing.
    assert!(store.take_conflicting_votes(&Round::new(9, 9)).is_empty());
}
