/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! "Inert" types: those that are sent around and inspected, but have no active behavior. These
//! types follow the newtype pattern and the API for using them is defined in this module.

use borsh::{BorshDeserialize, BorshSerialize};
use std::{
    fmt::{self, Debug, Display, Formatter},
    ops::{Add, AddAssign},
};

/// Height of the ledger that agreement is currently being sought for. Every reject attempt at the
/// same height shares the same `BlockRound`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize,
)]
pub struct BlockRound(u64);

impl BlockRound {
    pub const fn new(int: u64) -> Self {
        Self(int)
    }

    pub const fn int(&self) -> u64 {
        self.0
    }
}

impl Display for BlockRound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl AddAssign<u64> for BlockRound {
    fn add_assign(&mut self, rhs: u64) {
        self.0.add_assign(rhs)
    }
}

impl Add<u64> for BlockRound {
    type Output = BlockRound;

    fn add(self, rhs: u64) -> Self::Output {
        BlockRound(self.0.add(rhs))
    }
}

/// Index of a reject attempt within a single [`BlockRound`]. Starts at 0 and increases by 1 every
/// time the cluster proves that no candidate can reach supermajority at the current attempt.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize,
)]
pub struct RejectRound(u64);

impl RejectRound {
    pub const fn new(int: u64) -> Self {
        Self(int)
    }

    pub const fn int(&self) -> u64 {
        self.0
    }
}

impl Display for RejectRound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl Add<u64> for RejectRound {
    type Output = RejectRound;

    fn add(self, rhs: u64) -> Self::Output {
        RejectRound(self.0.add(rhs))
    }
}

/// Identifier of one agreement attempt: the `reject_round`-th reject attempt at ledger height
/// `block_round`.
///
/// Rounds are totally ordered lexicographically by `(block_round, reject_round)` (the field order
/// of the derived `Ord`).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, BorshDeserialize, BorshSerialize,
)]
pub struct Round {
    pub block_round: BlockRound,
    pub reject_round: RejectRound,
}

impl Round {
    pub const fn new(block_round: u64, reject_round: u64) -> Round {
        Round {
            block_round: BlockRound::new(block_round),
            reject_round: RejectRound::new(reject_round),
        }
    }

    /// The round the cluster advances to after this round is rejected: same height, next attempt.
    pub fn next_reject_round(&self) -> Round {
        Round {
            block_round: self.block_round,
            reject_round: self.reject_round + 1,
        }
    }
}

impl Display for Round {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.block_round, self.reject_round)
    }
}

/// An opaque 32-byte digest. Used as both halves of a
/// [`CandidateHash`](crate::types::candidate::CandidateHash).
#[derive(Clone, Copy, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub struct CryptoHash([u8; 32]);

impl CryptoHash {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl Display for CryptoHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Debug for CryptoHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Signature represented in bytes.
#[derive(Clone, Copy, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct SignatureBytes([u8; 64]);

impl SignatureBytes {
    pub const fn new(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; 64] {
        self.0
    }
}

impl Debug for SignatureBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
