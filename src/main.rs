//! index-plan: decide which files of a set of checkouts get indexed
//!
//! Walks each checkout against layered ignore rules, classifies the result
//! against size and count thresholds, and reports changes since the last
//! indexed baseline.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
