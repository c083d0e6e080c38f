// -*- mode: rust; -*-
//
// This file is part of elligator25519.
// See LICENSE for licensing information.

//! Arithmetic using 64-bit limbs with 128-bit products.

pub mod constants;
pub mod field;
