//! # addcopyright
//!
//! A tool that ensures source files carry the project copyright header.

use anyhow::Result;

use addcopyright::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();

  run(cli)
}
