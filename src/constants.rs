// -*- mode: rust; -*-
//
// This file is part of elligator25519.
// See LICENSE for licensing information.

//! Curve constants: the basepoints, the subgroup order, and the field
//! constants used by the codec.

use crate::montgomery::MontgomeryPoint;

pub(crate) use crate::backend::serial::u64::constants::{
    APLUS2_OVER_FOUR, MONTGOMERY_A, MONTGOMERY_A_NEG, SQRT_M1,
};

/// The X25519 basepoint, `u = 9`.  Generates the prime-order subgroup.
pub const BASEPOINT: MontgomeryPoint = MontgomeryPoint([
    0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
]);

/// The "dirty" basepoint, which generates the whole curve group rather
/// than the prime-order subgroup.
///
/// This is the u-coordinate of `B + [5]L`, where `B` is the standard
/// basepoint and `L` a point of order 8.  The multiplier 5 is the
/// inverse of `ℓ mod 8`, chosen so that multiplying by the dirty
/// ladder integer `clamp(sk) + (sk mod 8)·ℓ` yields
/// `clamp(sk)·B + (sk mod 8)·L` exactly.
pub const DIRTY_BASEPOINT: MontgomeryPoint = MontgomeryPoint([
    0xd8, 0x86, 0x1a, 0xa2, 0x78, 0x7a, 0xd9, 0x26, 0x8b, 0x74, 0x74, 0xb6, 0x82, 0xe3, 0xbe,
    0xc3, 0xce, 0x36, 0x9a, 0x1e, 0x5e, 0x31, 0x47, 0xa2, 0x6d, 0x37, 0x7c, 0xfd, 0x20, 0xb5,
    0xdf, 0x75,
]);

/// The order of the prime-order subgroup,
/// `ℓ = 2^252 + 27742317777372353535851937790883648493`,
/// in little-endian bytes.
pub(crate) const BASEPOINT_ORDER_BYTES: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x10,
];

#[cfg(test)]
mod test {
    use super::*;
    use crate::field::FieldElement;

    #[test]
    fn sqrt_m1_squares_to_minus_one() {
        assert_eq!(SQRT_M1.square(), FieldElement::MINUS_ONE);
    }

    #[test]
    fn a_neg_is_minus_a() {
        assert_eq!(-&MONTGOMERY_A, MONTGOMERY_A_NEG);
    }
}
