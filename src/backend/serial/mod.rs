// -*- mode: rust; -*-
//
// This file is part of elligator25519.
// See LICENSE for licensing information.

//! Serial (non-vectorized) arithmetic backends.

pub mod u64;
