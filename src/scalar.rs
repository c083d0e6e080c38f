// -*- mode: rust; -*-
//
// This file is part of elligator25519.
// See LICENSE for licensing information.

//! Scalar conventions for the X25519-style ladder.
//!
//! There is no general scalar arithmetic here: the ladder consumes raw
//! little-endian integers.  This module provides the two byte-level
//! transformations the crate needs, the standard X25519 clamp and the
//! "dirty" ladder integer that folds the cofactor component of a
//! secret key into a single 256-bit multiplier.

use crate::constants::BASEPOINT_ORDER_BYTES;

/// Clamp the bytes of a scalar per the X25519 convention: clear the
/// low three bits (kill the cofactor component), clear the top bit,
/// and set bit 254 (fix the ladder length).
///
/// The result is a multiple of 8 in the range \\([2\^{254}, 2\^{255})\\).
pub const fn clamp_integer(bytes: [u8; 32]) -> [u8; 32] {
    let mut s = bytes;
    s[0] &= 0b1111_1000;
    s[31] &= 0b0111_1111;
    s[31] |= 0b0100_0000;
    s
}

/// Compute the ladder integer for dirty fixed-base multiplication:
/// `clamp(bytes) + (bytes mod 8)·ℓ`, little endian.
///
/// Multiplying the dirty basepoint `B + [5]L` by this integer yields
/// `clamp(bytes)·B + (bytes mod 8)·L`: the `ℓ` multiples vanish against
/// `B`, the clamped scalar (a multiple of 8) vanishes against the
/// order-8 point, and `5·ℓ ≡ 1 (mod 8)` leaves exactly the cofactor
/// component selected by the low three bits of the input.
///
/// The sum is below \\(2\^{256}\\): the clamped scalar is below
/// \\(2\^{255}\\) and `7·ℓ` is below \\(2\^{255}\\), so the final carry
/// out of the high byte is always zero.
pub(crate) fn dirty_ladder_integer(bytes: [u8; 32]) -> [u8; 32] {
    let clamped = clamp_integer(bytes);
    let torsion = (bytes[0] & 0b0000_0111) as u16;

    let mut out = [0u8; 32];
    let mut carry: u16 = 0;
    for i in 0..32 {
        let t = clamped[i] as u16 + BASEPOINT_ORDER_BYTES[i] as u16 * torsion + carry;
        out[i] = t as u8;
        carry = t >> 8;
    }
    debug_assert!(carry == 0);

    out
}
