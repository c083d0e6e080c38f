// -*- mode: rust; -*-
//
// This file is part of elligator25519.
// See LICENSE for licensing information.

//! Replays the recorded fixture files through the same checkers the
//! `check-vectors` binary uses.
//!
//! The fixtures were generated from the reference implementation:
//! 65 direct-map records (including representative 0), 81 reverse-map
//! records (including the zero point and sixteen expected failures),
//! and 32 dirty scalar multiplications covering every value of the
//! cofactor component.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use elligator25519::vectors;

fn fixture(name: &str) -> BufReader<File> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/vectors")
        .join(name);
    BufReader::new(File::open(&path).expect("missing fixture file"))
}

#[test]
fn direct_map_fixtures() {
    let outcome = vectors::check_direct(fixture("direct.vec")).unwrap();
    assert_eq!(outcome.tests, 65);
    assert_eq!(outcome.failures, 0);
}

#[test]
fn reverse_map_fixtures() {
    let outcome = vectors::check_reverse(fixture("reverse.vec")).unwrap();
    assert_eq!(outcome.tests, 81);
    assert_eq!(outcome.failures, 0);
}

#[test]
fn scalarmult_fixtures() {
    let outcome = vectors::check_scalarmult(fixture("scalarmult.vec")).unwrap();
    assert_eq!(outcome.tests, 32);
    assert_eq!(outcome.failures, 0);
}
