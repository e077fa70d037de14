/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Definition of the [CandidateHash] type: the identity of one proposed outcome competing for
//! agreement within a round.

use borsh::{BorshDeserialize, BorshSerialize};
use std::fmt::{self, Display, Formatter};

use super::basic::CryptoHash;

/// Composite identity of a candidate outcome: the hash of the proposal it was produced from, and
/// the hash of the block it would commit.
///
/// Two votes carrying an equal `CandidateHash` within the same [`Round`](super::basic::Round) are
/// votes for the same outcome. Competing candidates in one round differ in at least one of the
/// two components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, BorshDeserialize, BorshSerialize)]
pub struct CandidateHash {
    pub proposal: CryptoHash,
    pub block: CryptoHash,
}

impl CandidateHash {
    pub const fn new(proposal: CryptoHash, block: CryptoHash) -> CandidateHash {
        CandidateHash { proposal, block }
    }
}

impl Display for CandidateHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.proposal, self.block)
    }
}
