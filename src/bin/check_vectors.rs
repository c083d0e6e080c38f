// -*- mode: rust; -*-
//
// This file is part of elligator25519.
// See LICENSE for licensing information.

//! Vector-driven checker for the Elligator2 codec and the dirty
//! scalar multiplication.
//!
//! Replays the three fixture categories against this implementation
//! and reports one `OK`/`FAILED` line per category on stderr.  The
//! exit status is nonzero if any category failed or any fixture file
//! was unreadable or malformed; malformed fixtures abort the run
//! immediately so that corruption is surfaced loudly rather than
//! shrinking the test count.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use elligator25519::vectors::{self, Outcome, VectorError};

/// Check Elligator2/Curve25519 test-vector fixtures.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Forward-map fixtures (representative : point-u : point-v)
    direct: PathBuf,

    /// Reverse-map fixtures (point : sign : padding : success : representative)
    reverse: PathBuf,

    /// Dirty fixed-base scalar multiplication fixtures (scalar : point)
    scalarmult: PathBuf,
}

fn check(
    name: &str,
    path: &Path,
    run: fn(BufReader<File>) -> Result<Outcome, VectorError>,
) -> Result<Outcome, ()> {
    let file = File::open(path).map_err(|e| {
        eprintln!("cannot open {}: {}", path.display(), e);
    })?;
    let outcome = run(BufReader::new(file)).map_err(|e| {
        eprintln!("bad fixture {}: {}", path.display(), e);
    })?;

    let status = if outcome.all_passed() { "OK" } else { "FAILED" };
    eprintln!("{} ({:3} tests): {}", status, outcome.tests, name);
    Ok(outcome)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let categories: [(&str, &Path, fn(BufReader<File>) -> Result<Outcome, VectorError>); 3] = [
        ("direct map", &args.direct, vectors::check_direct),
        ("reverse map", &args.reverse, vectors::check_reverse),
        ("scalarmult", &args.scalarmult, vectors::check_scalarmult),
    ];

    let mut failed = false;
    for (name, path, run) in categories {
        match check(name, path, run) {
            Ok(outcome) => failed |= !outcome.all_passed(),
            // Unreadable or malformed fixtures end the run at once.
            Err(()) => return ExitCode::FAILURE,
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
