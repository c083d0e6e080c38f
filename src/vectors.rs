// -*- mode: rust; -*-
//
// This file is part of elligator25519.
// See LICENSE for licensing information.

//! Parsing and checking of `.vec` test fixtures.
//!
//! The fixture format is a flat text stream of hex-encoded fields,
//! each terminated by `:`.  Anything that is not a hex digit is a
//! separator *between* fields; inside a field it is a format error.  A
//! field may be empty (`:` alone).  End of input before a field starts
//! ends the stream cleanly; end of input inside a field or inside a
//! record does not.
//!
//! Three record shapes are understood, one per test category:
//!
//! | category     | fields                                            |
//! |--------------|---------------------------------------------------|
//! | direct map   | `representative : point-u : point-v`              |
//! | reverse map  | `point : sign : padding : success : representative` |
//! | scalar mult  | `scalar : point`                                  |
//!
//! In the reverse tuples, `sign` is the tweak's sign bit (`00`/`01`),
//! `padding` shifts into the tweak's two high bits (`00`/`ff`), and
//! `success` uses the reference return-code convention: `00` for a
//! mappable point, `ff` for an unmappable one, in which case the
//! `representative` field is empty.  The direct tuples record the
//! point's v coordinate, which the u-only codec ignores.
//!
//! One reader serves all three categories; the per-category checkers
//! are shared by the `check-vectors` binary and the integration tests,
//! so there is exactly one implementation of the comparison logic.

use std::io::{self, Read};

use thiserror::Error;

use crate::elligator;
use crate::montgomery::MontgomeryPoint;

/// A failure to parse a fixture stream.
///
/// Format errors are fatal to a test run: corrupt fixtures should
/// abort loudly rather than shrink the test count.
#[derive(Debug, Error)]
pub enum VectorError {
    /// The underlying reader failed.
    #[error("i/o error in vector stream: {0}")]
    Io(#[from] io::Error),

    /// A field contained an odd number of hex digits.
    #[error("odd number of hex digits in field")]
    OddDigits,

    /// A non-hex, non-separator byte appeared inside a field.
    #[error("unexpected byte {0:#04x} inside field")]
    UnexpectedByte(u8),

    /// The stream ended inside a field, before the terminating `:`.
    #[error("unterminated field at end of stream")]
    UnterminatedField,

    /// The stream ended in the middle of a record.
    #[error("truncated record: expected {expected} fields, found {found}")]
    TruncatedRecord {
        /// Fields the record shape requires.
        expected: usize,
        /// Fields present before the stream ended.
        found: usize,
    },

    /// A field decoded to the wrong number of bytes for its position.
    #[error("field holds {found} bytes where {expected} were expected")]
    FieldLength {
        /// Bytes the record shape requires.
        expected: usize,
        /// Bytes the field decoded to.
        found: usize,
    },
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Streaming reader for `:`-terminated hex fields.
pub struct VectorReader<R: Read> {
    bytes: io::Bytes<R>,
}

impl<R: Read> VectorReader<R> {
    /// Wrap a byte stream.  Callers should hand in a buffered reader
    /// when reading from a file.
    pub fn new(reader: R) -> VectorReader<R> {
        VectorReader {
            bytes: reader.bytes(),
        }
    }

    /// Read the next field.
    ///
    /// Returns `Ok(None)` on a clean end of stream, and the decoded
    /// bytes (possibly zero of them) otherwise.
    pub fn next_field(&mut self) -> Result<Option<Vec<u8>>, VectorError> {
        let mut field = Vec::new();
        let mut high: Option<u8> = None;
        let mut started = false;

        for byte in &mut self.bytes {
            let byte = byte?;
            if byte == b':' {
                if high.is_some() {
                    return Err(VectorError::OddDigits);
                }
                return Ok(Some(field));
            }
            match hex_value(byte) {
                Some(digit) => {
                    started = true;
                    match high.take() {
                        None => high = Some(digit),
                        Some(h) => field.push((h << 4) | digit),
                    }
                }
                // Separators are only allowed between fields.
                None if !started => continue,
                None => return Err(VectorError::UnexpectedByte(byte)),
            }
        }

        if started {
            Err(VectorError::UnterminatedField)
        } else {
            Ok(None)
        }
    }

    /// Read a full record of `arity` fields.
    ///
    /// Returns `Ok(None)` if the stream ends cleanly before the first
    /// field, and an error if it ends after it.
    pub fn next_record(&mut self, arity: usize) -> Result<Option<Vec<Vec<u8>>>, VectorError> {
        let first = match self.next_field()? {
            None => return Ok(None),
            Some(field) => field,
        };

        let mut record = Vec::with_capacity(arity);
        record.push(first);
        while record.len() < arity {
            match self.next_field()? {
                Some(field) => record.push(field),
                None => {
                    return Err(VectorError::TruncatedRecord {
                        expected: arity,
                        found: record.len(),
                    })
                }
            }
        }
        Ok(Some(record))
    }
}

fn fixed<const N: usize>(field: &[u8]) -> Result<[u8; N], VectorError> {
    field.try_into().map_err(|_| VectorError::FieldLength {
        expected: N,
        found: field.len(),
    })
}

fn flag(field: &[u8]) -> Result<u8, VectorError> {
    Ok(fixed::<1>(field)?[0])
}

/// Tally of a checked fixture category.
#[derive(Copy, Clone, Debug, Default)]
pub struct Outcome {
    /// Records checked.
    pub tests: u32,
    /// Records whose computed value disagreed with the fixture.
    pub failures: u32,
}

impl Outcome {
    /// True when every record agreed.
    pub fn all_passed(&self) -> bool {
        self.failures == 0
    }

    fn tally(&mut self, pass: bool) {
        self.tests += 1;
        if !pass {
            self.failures += 1;
        }
    }
}

/// Check forward-map fixtures: each representative must map to the
/// recorded point.
pub fn check_direct<R: Read>(reader: R) -> Result<Outcome, VectorError> {
    let mut vectors = VectorReader::new(reader);
    let mut outcome = Outcome::default();

    while let Some(record) = vectors.next_record(3)? {
        let representative: [u8; 32] = fixed(&record[0])?;
        let expected: [u8; 32] = fixed(&record[1])?;
        // record[2] is the v coordinate; the u-only map discards it.

        let point = elligator::map_to_point(&representative);
        outcome.tally(point.to_bytes() == expected);
    }
    Ok(outcome)
}

/// Check reverse-map fixtures: each point must map (or fail to map)
/// exactly as recorded.
pub fn check_reverse<R: Read>(reader: R) -> Result<Outcome, VectorError> {
    let mut vectors = VectorReader::new(reader);
    let mut outcome = Outcome::default();

    while let Some(record) = vectors.next_record(5)? {
        let point = MontgomeryPoint(fixed(&record[0])?);
        let sign = flag(&record[1])?;
        let padding = flag(&record[2])?;
        let expect_failure = flag(&record[3])? != 0;

        let tweak = (sign & 1) | (padding << 6);
        let produced: Option<[u8; 32]> =
            elligator::point_to_representative(&point, tweak).into();

        let pass = if expect_failure {
            produced.is_none()
        } else {
            let expected: [u8; 32] = fixed(&record[4])?;
            produced == Some(expected)
        };
        outcome.tally(pass);
    }
    Ok(outcome)
}

/// Check dirty fixed-base scalar multiplication fixtures.
pub fn check_scalarmult<R: Read>(reader: R) -> Result<Outcome, VectorError> {
    let mut vectors = VectorReader::new(reader);
    let mut outcome = Outcome::default();

    while let Some(record) = vectors.next_record(2)? {
        let scalar: [u8; 32] = fixed(&record[0])?;
        let expected: [u8; 32] = fixed(&record[1])?;

        let point = MontgomeryPoint::mul_base_dirty(scalar);
        outcome.tally(point.to_bytes() == expected);
    }
    Ok(outcome)
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
