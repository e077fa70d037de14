//! Tests for the supermajority arithmetic: the threshold formula, the size check, the reject
//! proof condition, and the signer-subset guard.

mod common;

use yac_rs::supermajority::{check_size, has_reject, peers_subset, threshold};

#[test]
fn threshold_is_two_f_plus_one() {
    // f = (total - 1) / 3, threshold = 2f + 1.
    assert_eq!(threshold(1), 1);
    assert_eq!(threshold(3), 1);
    assert_eq!(threshold(4), 3);
    assert_eq!(threshold(7), 5);
    assert_eq!(threshold(10), 7);
    assert_eq!(threshold(100), 67);
}

#[test]
fn check_size_accepts_only_threshold_to_total() {
    assert!(!check_size(2, 4));
    assert!(check_size(3, 4));
    assert!(check_size(4, 4));

    // A claimed count above the known peer count is never a supermajority.
    assert!(!check_size(5, 4));

    assert!(!check_size(4, 7));
    assert!(check_size(5, 7));
    assert!(check_size(7, 7));
}

#[test]
fn has_reject_requires_silent_peers_to_be_insufficient() {
    // 7 peers, threshold 5. With 6 peers voted and the leader at 3, the single silent peer can
    // only bring the leader to 4: reject is provable.
    assert!(has_reject(3, 6, 7));

    // With only 5 peers voted, two silent peers could still bring the leader to 5.
    assert!(!has_reject(3, 5, 7));

    // A leader already at threshold is never a reject, regardless of who is silent.
    assert!(!has_reject(5, 7, 7));

    // Everyone voted and the leader is below threshold.
    assert!(has_reject(4, 7, 7));
}

#[test]
fn peers_subset_rejects_unknown_signers() {
    let keypairs = common::keypairs(4);
    let peers = common::peer_set(&keypairs[..3]);

    let known: Vec<_> = keypairs[..3].iter().map(|kp| kp.public()).collect();
    assert!(peers_subset(&known, &peers));

    let with_stranger: Vec<_> = keypairs.iter().map(|kp| kp.public()).collect();
    assert!(!peers_subset(&with_stranger, &peers));

    // Vacuously true: no signers, nothing to defend against.
    assert!(peers_subset(&Vec::new(), &peers));
}
