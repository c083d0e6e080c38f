// -*- mode: rust; -*-
//
// This file is part of elligator25519.
// See LICENSE for licensing information.

//! Pluggable arithmetic backends.
//!
//! Only the serial 64-bit backend is implemented; a 32-bit backend
//! would slot in as a sibling of `serial::u64` and be selected by the
//! `field` and `constants` type aliases.

pub mod serial;
