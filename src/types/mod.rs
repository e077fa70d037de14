/*
    Copyright © 2023, ParallelChain Lab
    Licensed under the Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
*/

//! Types that are used across multiple components of yac_rs.
//!
//! The types defined in [`crate::types::basic`] are "inert" newtypes; the remaining submodules
//! define the identities the protocol works with: candidates, peers, and the local signing key.

pub mod basic;

pub mod candidate;

pub mod peers;

pub mod keypair;
