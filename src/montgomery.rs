// -*- mode: rust; -*-
//
// This file is part of elligator25519.
// See LICENSE for licensing information.

//! Scalar multiplication on the Montgomery form of Curve25519.
//!
//! We use variables \\( u, v \\) for the Montgomery curve, so that
//! "Montgomery \\(u\\)" here corresponds to "Montgomery \\(x\\)"
//! elsewhere.  Montgomery arithmetic works not on the curve itself,
//! but on the \\(u\\)-line, which discards sign information and
//! unifies the curve and its quadratic twist.  See
//! [_Montgomery curves and their arithmetic_][costello-smith] by
//! Costello and Smith for more details.
//!
//! Two fixed-base multiplications are provided:
//!
//! * [`MontgomeryPoint::mul_base_clamped`] — the ordinary X25519
//!   operation, which clamps the scalar and therefore always lands in
//!   the prime-order subgroup;
//! * [`MontgomeryPoint::mul_base_dirty`] — the cofactor-preserving
//!   variant, which keeps the low three bits of the scalar as a
//!   low-order component so that outputs span the whole curve group.
//!   Elligator representatives of such points are indistinguishable
//!   from random strings; representatives of subgroup points are not.
//!
//! [costello-smith]: https://eprint.iacr.org/2017/212.pdf

// Coordinates in projective space are traditionally written with the
// capitalisation of their affine counterparts.
#![allow(non_snake_case)]

use crate::constants::{APLUS2_OVER_FOUR, BASEPOINT, DIRTY_BASEPOINT};
use crate::field::FieldElement;
use crate::scalar::{clamp_integer, dirty_ladder_integer};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Holds the \\(u\\)-coordinate of a point on the Montgomery form of
/// Curve25519 or its twist.
#[derive(Copy, Clone, Debug, Default)]
pub struct MontgomeryPoint(pub [u8; 32]);

/// Equality of `MontgomeryPoint`s is defined mod p.
impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        let self_fe = FieldElement::from_bytes(&self.0);
        let other_fe = FieldElement::from_bytes(&other.0);

        self_fe.ct_eq(&other_fe)
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for MontgomeryPoint {}

#[cfg(feature = "zeroize")]
impl Zeroize for MontgomeryPoint {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl MontgomeryPoint {
    /// The identity element of the \\(u\\)-line, \\(u = 0\\).
    pub const fn identity() -> MontgomeryPoint {
        MontgomeryPoint([0u8; 32])
    }

    /// View this `MontgomeryPoint` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert this `MontgomeryPoint` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Multiply this point by `clamp_integer(bytes)`.
    ///
    /// The output is the shared-secret side of X25519: given a peer's
    /// (decoded) public point and our secret bytes, this is the raw
    /// Diffie-Hellman result.  The all-zero output for low-order
    /// inputs is *not* rejected here; contributory-behavior checks
    /// belong to the protocol layer.
    pub fn mul_clamped(self, bytes: [u8; 32]) -> MontgomeryPoint {
        self.mul_bits_be(bits_be(&clamp_integer(bytes)))
    }

    /// Multiply the X25519 basepoint by `clamp_integer(bytes)`.
    ///
    /// This is ordinary X25519 public-key generation; the result
    /// always lies in the prime-order subgroup.
    pub fn mul_base_clamped(bytes: [u8; 32]) -> MontgomeryPoint {
        BASEPOINT.mul_bits_be(bits_be(&clamp_integer(bytes)))
    }

    /// Multiply the basepoint by `bytes`, preserving the cofactor:
    /// compute `clamp(bytes)·B + (bytes mod 8)·L` for an order-8 point
    /// `L`, encoded as the standard 32-byte u-coordinate.
    ///
    /// Every 32-byte scalar is accepted; nothing is rejected or
    /// validated, and degenerate scalars produce the corresponding
    /// degenerate (possibly low-order) points.  Runs in constant time
    /// with respect to `bytes`.
    ///
    /// Implemented as a single 256-bit ladder over [`DIRTY_BASEPOINT`]
    /// with the combined integer `clamp(bytes) + (bytes mod 8)·ℓ`.
    pub fn mul_base_dirty(bytes: [u8; 32]) -> MontgomeryPoint {
        DIRTY_BASEPOINT.mul_bits_be(bits_be(&dirty_ladder_integer(bytes)))
    }

    /// Given `self` \\( = u\_0(P) \\) and big-endian bits of an
    /// integer \\(n\\), return \\( u\_0(\[n\]P) \\).
    ///
    /// The iterator must have a length independent of any secret; the
    /// ladder performs one swap-double-add per bit.
    fn mul_bits_be(&self, bits: impl Iterator<Item = bool>) -> MontgomeryPoint {
        // Algorithm 8 of Costello-Smith 2017.
        let affine_u = FieldElement::from_bytes(&self.0);
        let mut x0 = ProjectivePoint::identity();
        let mut x1 = ProjectivePoint {
            U: affine_u,
            W: FieldElement::ONE,
        };

        // Rather than swap before and after every ladder step, swap
        // by the XOR of successive bits, and once more at the end by
        // the lowest bit.
        let mut prev_bit = false;
        for cur_bit in bits {
            let choice: u8 = (prev_bit ^ cur_bit) as u8;

            ProjectivePoint::conditional_swap(&mut x0, &mut x1, choice.into());
            differential_add_and_double(&mut x0, &mut x1, &affine_u);

            prev_bit = cur_bit;
        }
        ProjectivePoint::conditional_swap(&mut x0, &mut x1, Choice::from(prev_bit as u8));

        x0.as_affine()
    }
}

/// Iterate the bits of a little-endian integer from most to least
/// significant.
fn bits_be(bytes: &[u8; 32]) -> impl Iterator<Item = bool> + '_ {
    bytes
        .iter()
        .rev()
        .flat_map(|byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
}

/// A `ProjectivePoint` holds a point on the projective line
/// \\( \mathbb P(\mathbb F\_p) \\), which we identify with the Kummer
/// line of the Montgomery curve.
#[derive(Copy, Clone, Debug)]
struct ProjectivePoint {
    U: FieldElement,
    W: FieldElement,
}

impl ProjectivePoint {
    fn identity() -> ProjectivePoint {
        ProjectivePoint {
            U: FieldElement::ONE,
            W: FieldElement::ZERO,
        }
    }

    /// Dehomogenize this point to affine coordinates.
    ///
    /// # Return
    ///
    /// * \\( u = U / W \\) if \\( W \neq 0 \\);
    /// * \\( 0 \\) if \\( W = 0 \\);
    fn as_affine(&self) -> MontgomeryPoint {
        let u = &self.U * &self.W.invert();
        MontgomeryPoint(u.as_bytes())
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(
        a: &ProjectivePoint,
        b: &ProjectivePoint,
        choice: Choice,
    ) -> ProjectivePoint {
        ProjectivePoint {
            U: FieldElement::conditional_select(&a.U, &b.U, choice),
            W: FieldElement::conditional_select(&a.W, &b.W, choice),
        }
    }
}

/// Perform the double-and-add step of the Montgomery ladder.
///
/// Given projective points
/// \\( (U\_P : W\_P) = u(P) \\),
/// \\( (U\_Q : W\_Q) = u(Q) \\),
/// and the affine difference
/// \\(      u\_{P-Q} = u(P-Q) \\), set
/// $$
///     (U\_P : W\_P) \gets u(\[2\]P)
/// $$
/// and
/// $$
///     (U\_Q : W\_Q) \gets u(P + Q).
/// $$
#[rustfmt::skip] // keep alignment of explanatory comments
fn differential_add_and_double(
    P: &mut ProjectivePoint,
    Q: &mut ProjectivePoint,
    affine_PmQ: &FieldElement,
) {
    let t0 = &P.U + &P.W;
    let t1 = &P.U - &P.W;
    let t2 = &Q.U + &Q.W;
    let t3 = &Q.U - &Q.W;

    let t4 = t0.square();   // (U_P + W_P)^2 = U_P^2 + 2 U_P W_P + W_P^2
    let t5 = t1.square();   // (U_P - W_P)^2 = U_P^2 - 2 U_P W_P + W_P^2

    let t6 = &t4 - &t5;     // 4 U_P W_P

    let t7 = &t0 * &t3;     // (U_P + W_P) (U_Q - W_Q) = U_P U_Q + W_P U_Q - U_P W_Q - W_P W_Q
    let t8 = &t1 * &t2;     // (U_P - W_P) (U_Q + W_Q) = U_P U_Q - W_P U_Q + U_P W_Q - W_P W_Q

    let t9  = &t7 + &t8;    // 2 (U_P U_Q - W_P W_Q)
    let t10 = &t7 - &t8;    // 2 (W_P U_Q - U_P W_Q)

    let t11 =  t9.square(); // 4 (U_P U_Q - W_P W_Q)^2
    let t12 = t10.square(); // 4 (W_P U_Q - U_P W_Q)^2

    let t13 = &APLUS2_OVER_FOUR * &t6; // (A + 2) U_P U_Q

    let t14 = &t4 * &t5;    // ((U_P + W_P)(U_P - W_P))^2 = (U_P^2 - W_P^2)^2
    let t15 = &t13 + &t5;   // (U_P - W_P)^2 + (A + 2) U_P W_P

    let t16 = &t6 * &t15;   // 4 (U_P W_P) ((U_P - W_P)^2 + (A + 2) U_P W_P)

    let t17 = affine_PmQ * &t12; // U_D * 4 (W_P U_Q - U_P W_Q)^2
    let t18 = t11;               // W_D * 4 (U_P U_Q - W_P W_Q)^2

    P.U = t14;  // U_{P'} = (U_P + W_P)^2 (U_P - W_P)^2
    P.W = t16;  // W_{P'} = (4 U_P W_P) ((U_P - W_P)^2 + ((A + 2)/4) 4 U_P W_P)
    Q.U = t18;  // U_{Q'} = W_D * 4 (U_P U_Q - W_P W_Q)^2
    Q.W = t17;  // W_{Q'} = U_D * 4 (W_P U_Q - U_P W_Q)^2
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
