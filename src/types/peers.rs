/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definitions for the [PeerSet] type and its associated methods.

use rand::seq::SliceRandom;
use std::slice;

pub use ed25519_dalek::{Signature, SigningKey, VerifyingKey};

/// Identities of the peers participating in a round of agreement.
///
/// The peer set maintains the list of peers in ascending order of their [public keys](VerifyingKey)
/// and avails [PeerSet::peers] to walk them in this order. This protocol is one-peer-one-vote, so
/// unlike a weighted validator set there are no powers to track: the supermajority arithmetic in
/// [crate::supermajority] works over [PeerSet::len] alone.
///
/// A `PeerSet` is a *snapshot*: it is taken from the membership collaborator at the moment a round
/// is opened and stays fixed for that round's lifetime.
#[derive(Clone, Default)]
pub struct PeerSet {
    // The verifying keys of peers are included here in ascending order.
    peers: Vec<VerifyingKey>,
}

impl PeerSet {
    pub fn new() -> PeerSet {
        Self { peers: Vec::new() }
    }

    pub fn put(&mut self, peer: &VerifyingKey) {
        let peer_bytes = peer.to_bytes();
        if let Err(insert_pos) = self
            .peers
            .binary_search_by(|p| p.to_bytes().cmp(&peer_bytes))
        {
            self.peers.insert(insert_pos, *peer);
        }
    }

    pub fn contains(&self, peer: &VerifyingKey) -> bool {
        self.position(peer).is_some()
    }

    pub fn remove(&mut self, peer: &VerifyingKey) -> Option<VerifyingKey> {
        let peer_bytes = peer.to_bytes();
        match self.peers.binary_search_by(|p| p.to_bytes().cmp(&peer_bytes)) {
            Ok(pos) => Some(self.peers.remove(pos)),
            Err(_) => None,
        }
    }

    /// Get an iterator through peers' verifying keys which walks through them in ascending order.
    pub fn peers(&self) -> slice::Iter<VerifyingKey> {
        self.peers.iter()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn position(&self, peer: &VerifyingKey) -> Option<usize> {
        let peer_bytes = peer.to_bytes();
        self.peers
            .binary_search_by(|p| p.to_bytes().cmp(&peer_bytes))
            .ok()
    }

    /// Pick a uniformly random member, e.g., to ask for catch-up state when a round is not
    /// recognized locally.
    pub fn random(&self) -> Option<&VerifyingKey> {
        self.peers.choose(&mut rand::thread_rng())
    }
}

impl FromIterator<VerifyingKey> for PeerSet {
    fn from_iter<I: IntoIterator<Item = VerifyingKey>>(iter: I) -> PeerSet {
        let mut peer_set = PeerSet::new();
        for peer in iter {
            peer_set.put(&peer);
        }
        peer_set
    }
}
