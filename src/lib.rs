// -*- mode: rust; -*-
//
// This file is part of elligator25519.
// See LICENSE for licensing information.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//------------------------------------------------------------------------
// Public modules
//------------------------------------------------------------------------

// Curve constants: basepoints, the subgroup order, field constants.
pub mod constants;

// The Elligator2 codec: uniform representative <-> curve point.
pub mod elligator;

// The Montgomery u-line: points, the ladder, clamped and dirty
// fixed-base multiplication.
pub mod montgomery;

// Scalar clamping and the dirty ladder integer.
pub mod scalar;

// Parsing and checking of `.vec` test fixtures.
#[cfg(feature = "std")]
pub mod vectors;

//------------------------------------------------------------------------
// Internal modules
//------------------------------------------------------------------------

// Arithmetic backends (serial u64 only, for now).
pub(crate) mod backend;

// Finite field arithmetic mod p = 2^255 - 19.
pub(crate) mod field;

pub use crate::montgomery::MontgomeryPoint;
