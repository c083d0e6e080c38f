// -*- mode: rust; -*-
//
// This file is part of elligator25519.
// See LICENSE for licensing information.

//! The Elligator2 codec: mapping uniform 32-byte strings to curve
//! points and back again.
//!
//! The forward map takes any 32-byte *representative* (its top two
//! bits are padding and are ignored) to the u-coordinate of a point on
//! Curve25519.  The backward map is its partial inverse: roughly half
//! of all curve points have no representative, and for the other half
//! there are up to four valid encodings, disambiguated by a *tweak*
//! byte:
//!
//! * bit 0 selects which square root to return, corresponding to the
//!   sign of the point's v-coordinate;
//! * bits 6 and 7 are copied into the padding bits of the
//!   representative, so that all 256 bits of the wire encoding are
//!   uniformly distributed;
//! * bits 1 through 5 are ignored.
//!
//! Both directions run in constant time.  In particular the backward
//! map computes its output and its success flag with no data-dependent
//! branches; failure is reported through [`CtOption`].
//!
//! The map uses the non-residue Z = 2 and matches the reference
//! implementation at <https://elligator.org/> bit for bit, including
//! the sign convention: representatives are canonicalized to the lower
//! half of the field, where "negative" means exceeding (p-1)/2.

use crate::constants::{MONTGOMERY_A, MONTGOMERY_A_NEG};
use crate::field::FieldElement;
use crate::montgomery::MontgomeryPoint;

use subtle::{
    Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq, CtOption,
};

#[cfg(feature = "rand_core")]
use rand_core::{CryptoRng, RngCore};

/// The two high bits of a representative are padding: cleared before
/// decoding, and filled from the tweak when encoding.
const PADDING_BITS: u8 = 0b1100_0000;

/// Perform the Elligator2 mapping from a uniform representative to a
/// point on the Montgomery curve.
///
/// This function is total: every 32-byte string is a valid input, and
/// the padding bits are masked off before the bytes are interpreted as
/// a field element.  It is the inverse of [`point_to_representative`]
/// on that function's image.
pub fn map_to_point(representative: &[u8; 32]) -> MontgomeryPoint {
    let mut clamped = *representative;
    clamped[31] &= !PADDING_BITS;
    let r_0 = FieldElement::from_bytes(&clamped);
    let u = map_to_curve(&r_0);
    MontgomeryPoint(u.as_bytes())
}

/// The rational map itself: representative field element to
/// u-coordinate.
fn map_to_curve(r_0: &FieldElement) -> FieldElement {
    let one = FieldElement::ONE;
    let d_1 = &one + &r_0.square2(); /* 1 + 2r^2 */

    // 1 + 2r^2 = 0 cannot happen: -1/2 is not a square, so every
    // representative yields a well-defined d.  (invert(0) would give
    // d = 0 and u = 0 regardless, matching the reference formulas.)
    let d = &MONTGOMERY_A_NEG * &d_1.invert(); /* d = -A/(1+2r^2) */

    let d_sq = &d.square();
    let au = &MONTGOMERY_A * &d;

    let inner = &(d_sq + &au) + &one;
    let eps = &d * &inner; /* eps = d^3 + Ad^2 + d */

    let (eps_is_sq, _) = FieldElement::sqrt_ratio_i(&eps, &one);

    // u = d when eps is square, and -d - A when it is not.
    let zero = FieldElement::ZERO;
    let a_temp = FieldElement::conditional_select(&MONTGOMERY_A, &zero, eps_is_sq);
    let mut u = &d + &a_temp;
    u.conditional_negate(!eps_is_sq);

    u
}

/// Attempt the inverse Elligator2 mapping: from a curve point to a
/// uniform representative.
///
/// This operation may fail because only about half of all curve points
/// are in the image of the forward map.  Failure is a defined result,
/// not an error, and the membership test runs in constant time: the
/// same sequence of field operations is performed whether or not the
/// point is mappable, and the output buffer of a failed mapping is
/// unspecified garbage.
///
/// # Inputs
///
/// * `point`: the u-coordinate of a point on the curve.
/// * `tweak`: sign and padding selectors; see the module docs.
///
/// # Returns
///
/// A `CtOption` holding a representative `r` with
/// `map_to_point(&r) == *point`, whose flag is set iff the point is
/// mappable under the requested sign.
pub fn point_to_representative(point: &MontgomeryPoint, tweak: u8) -> CtOption<[u8; 32]> {
    let u = FieldElement::from_bytes(&point.0);
    let u_plus_a = &u + &MONTGOMERY_A;

    // -2u(u + A), zero exactly when u = 0 or u = -A.
    let t = &u * &u_plus_a;
    let minus_2t = -&(&t + &t);

    // root = sqrt(-1 / 2u(u+A)), when it exists.
    let (is_square, root) = minus_2t.invsqrt();

    // r = root * u     = sqrt(-u / 2(u+A))   for nonnegative v,
    //   = root * (u+A) = sqrt(-(u+A) / 2u)   for negative v.
    let numerator = FieldElement::conditional_select(&u, &u_plus_a, Choice::from(tweak & 1));
    let mut r = &root * &numerator;

    // Either root of r^2 is valid; canonicalize to the lower half of
    // the field.  "r is negative" here means 2r has its low bit set,
    // i.e. r > (p-1)/2.
    let r_is_high = (&r + &r).is_negative();
    r.conditional_negate(r_is_high);

    let mut bytes = r.as_bytes();
    bytes[31] |= tweak & PADDING_BITS;

    // u = 0 maps to representative 0 even though its radicand is
    // zero; u = -A does not map at all.
    let mappable = (is_square | minus_2t.is_zero()) & !u.ct_eq(&MONTGOMERY_A_NEG);

    CtOption::new(bytes, mappable)
}

impl MontgomeryPoint {
    /// Decode a uniform representative to the `MontgomeryPoint` it
    /// hides.  Total; inverse of [`MontgomeryPoint::to_representative`].
    pub fn from_representative(representative: &[u8; 32]) -> MontgomeryPoint {
        map_to_point(representative)
    }

    /// Try to encode this point as a uniform representative.  See
    /// [`point_to_representative`].
    pub fn to_representative(&self, tweak: u8) -> CtOption<[u8; 32]> {
        point_to_representative(self, tweak)
    }
}

/// Generate a keypair whose public key is guaranteed to have a uniform
/// representative, by rejection sampling.
///
/// Returns the secret key bytes and the representative of the dirty
/// public key `mul_base_dirty(secret)`.  The tweak is drawn from the
/// RNG once; since roughly half of all public keys are representable,
/// the expected number of trials is two.
///
/// # Panics
///
/// Panics if no representable key is found after 64 trials, which for
/// an honest RNG has probability \\(2\^{-64}\\); a broken RNG is the
/// only realistic cause.
#[cfg(feature = "rand_core")]
pub fn representable_keypair<R: RngCore + CryptoRng>(csprng: &mut R) -> ([u8; 32], [u8; 32]) {
    const RETRY_LIMIT: usize = 64;

    let tweak = csprng.next_u32() as u8;
    for _ in 0..RETRY_LIMIT {
        let mut secret = [0u8; 32];
        csprng.fill_bytes(&mut secret);

        let public = MontgomeryPoint::mul_base_dirty(secret);
        let representative: Option<[u8; 32]> = public.to_representative(tweak).into();
        if let Some(representative) = representative {
            return (secret, representative);
        }
    }

    panic!("failed to generate a representable key; bad RNG provided");
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{BASEPOINT, DIRTY_BASEPOINT};

    use rand::rngs::StdRng;
    use rand::{Rng, RngCore, SeedableRng};

    fn bytes32(hex_str: &str) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_str, &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn map_zero_to_zero() {
        let zero = [0u8; 32];
        assert_eq!(map_to_point(&zero).to_bytes(), zero);
    }

    #[test]
    fn map_matches_reference() {
        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(
            map_to_point(&one).to_bytes(),
            bytes32("9cdb525555555555555555555555555555555555555555555555555555555555"),
        );

        assert_eq!(
            map_to_point(&bytes32(
                "89a6f9376b833952e7d180eb2ffd811afc54a4208680a56ee5601e6da4abaf3b"
            ))
            .to_bytes(),
            bytes32("935563278d2e91af626221a5160dc46c56b978bbfac307d62df4fb6dac791635"),
        );

        assert_eq!(
            map_to_point(&bytes32(
                "46ef6a82b1dd40843f9630de8ea72e1f4bc48a33e23e445a44d78fae5de39a2d"
            ))
            .to_bytes(),
            bytes32("809512eabb6219a18d94320120572fa4ac5bf5a4a95bf2fecb6daf212d1bf469"),
        );

        assert_eq!(
            map_to_point(&bytes32(
                "cb089b3435d17f5bf0eaa4279ae9462e35ee0fe7a57fbd5a23897001a599ca14"
            ))
            .to_bytes(),
            bytes32("5aeb353ea0a7c9311d2c9e9e8e6a8a6d23de47b0e057ba06a8cf7e5de8732b1e"),
        );
    }

    #[test]
    fn map_ignores_padding_bits() {
        let raw = bytes32("9df62030934e2f2671c3bb43a7cd86f91a0d29926df29a0d5ff6bcb322a387c7");
        let mut masked = raw;
        masked[31] &= 0b0011_1111;
        assert_ne!(raw, masked);

        let expected =
            bytes32("4f6b8faf0d1d0daa0815c743b3fc6753cf44c2bd675b96ccaa3d5427625c1e43");
        assert_eq!(map_to_point(&raw).to_bytes(), expected);
        assert_eq!(map_to_point(&masked).to_bytes(), expected);
    }

    #[test]
    fn basepoint_representatives_match_reference() {
        // u = 9 is mappable; both sign branches are recorded.
        let rep: Option<[u8; 32]> = BASEPOINT.to_representative(0).into();
        assert_eq!(
            rep.unwrap(),
            bytes32("a1b146107da32a888fd12b270aa14c2ec61d330f0e007f56092f9a02da0a7f34"),
        );

        let rep: Option<[u8; 32]> = BASEPOINT.to_representative(1).into();
        assert_eq!(
            rep.unwrap(),
            bytes32("b9762dadc1db2944f08aeb419d76f6b19e66fd47ec1076dfe7a7a1c4e0f0a92b"),
        );

        // So is the dirty basepoint.
        let rep: Option<[u8; 32]> = DIRTY_BASEPOINT.to_representative(1).into();
        assert_eq!(
            rep.unwrap(),
            bytes32("ffbc10ee49f070987406ea7f4d6a7f43a8b4a4fb8338f411a2a3d21fd349d728"),
        );
    }

    #[test]
    fn unmappable_point_is_rejected_for_both_signs() {
        // A curve point outside the image of the forward map.
        let u = MontgomeryPoint(bytes32(
            "01a3ea5658f4e00622eeacf724e0bd82068992fae66ed2b04a8599be16662e35",
        ));
        for tweak in [0u8, 1] {
            let rep: Option<[u8; 32]> = u.to_representative(tweak).into();
            assert!(rep.is_none());
        }
    }

    #[test]
    fn zero_maps_both_ways() {
        let zero_point = MontgomeryPoint([0u8; 32]);
        let rep: Option<[u8; 32]> = zero_point.to_representative(0).into();
        assert_eq!(rep.unwrap(), [0u8; 32]);

        // The padding bits of the tweak land in the representative
        // even for the zero point.
        let rep: Option<[u8; 32]> = zero_point.to_representative(0xc0).into();
        let mut expected = [0u8; 32];
        expected[31] = 0xc0;
        assert_eq!(rep.unwrap(), expected);
        assert_eq!(map_to_point(&expected).to_bytes(), [0u8; 32]);
    }

    #[test]
    fn representative_padding_carries_tweak_bits() {
        let rep: Option<[u8; 32]> = BASEPOINT.to_representative(0b1000_0000).into();
        let rep = rep.unwrap();
        assert_eq!(rep[31] & 0b1100_0000, 0b1000_0000);

        // Bits 1..=5 of the tweak change nothing.
        let rep2: Option<[u8; 32]> = BASEPOINT.to_representative(0b0011_1110).into();
        let rep2 = rep2.unwrap();
        assert_eq!(
            rep2,
            Option::<[u8; 32]>::from(BASEPOINT.to_representative(0)).unwrap()
        );
    }

    #[test]
    fn roundtrip_from_representative() {
        // backward(forward(r)) re-encodes to the same point, whenever
        // it succeeds.
        let mut rng = StdRng::seed_from_u64(0x656c6c69);
        for _ in 0..200 {
            let mut representative = [0u8; 32];
            rng.fill_bytes(&mut representative);
            let tweak: u8 = rng.gen();

            let point = map_to_point(&representative);
            let rep2: Option<[u8; 32]> = point.to_representative(tweak).into();
            if let Some(rep2) = rep2 {
                assert_eq!(map_to_point(&rep2), point);
            }
        }
    }

    #[test]
    fn roundtrip_from_dirty_keys() {
        // Points produced by the dirty base multiplication either fail
        // to encode, or round-trip exactly.
        let mut rng = StdRng::seed_from_u64(0x32353531);
        let mut hits = 0;
        for _ in 0..100 {
            let mut secret = [0u8; 32];
            rng.fill_bytes(&mut secret);
            let tweak: u8 = rng.gen();

            let public = MontgomeryPoint::mul_base_dirty(secret);
            let rep: Option<[u8; 32]> = public.to_representative(tweak).into();
            if let Some(rep) = rep {
                hits += 1;
                assert_eq!(MontgomeryPoint::from_representative(&rep), public);
            }
        }
        // About half of all points are representable; the seed above
        // stays comfortably inside [20, 80].
        assert!(hits > 20 && hits < 80);
    }

    #[cfg(feature = "rand_core")]
    #[test]
    fn representable_keypair_roundtrips() {
        let mut rng = StdRng::seed_from_u64(0x6b657967);
        let (secret, representative) = representable_keypair(&mut rng);
        assert_eq!(
            MontgomeryPoint::from_representative(&representative),
            MontgomeryPoint::mul_base_dirty(secret),
        );
    }
}
