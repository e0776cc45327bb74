//! # CLI Module
//!
//! This module contains the command-line interface and the driver that walks
//! the (glob, prefix) table. It uses clap for argument parsing.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use tracing::{debug, warn};

use crate::config::{RunConfig, load_config};
use crate::detect::{CopyrightDetector, MarkerDetector};
use crate::header::HeaderBlock;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{self, CheckReport, InsertReport};
use crate::rewrite::{FileMutator, MutateOutcome, read_text};
use crate::scanner::TreeScanner;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug, Default)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Insert the header into every matching file under the current directory
  addcopyright

  # Report files missing the header; exits non-zero if any are found
  addcopyright --check

  # Check a different tree
  addcopyright --check path/to/tree

  # Use a custom pair table
  addcopyright --config headers.toml
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  /// Root directory to scan. Directories are processed recursively.
  #[arg(value_name = "ROOT", default_value = ".")]
  pub root: PathBuf,

  /// Check mode: report files missing the header without modifying them
  ///
  /// [default: insertion mode]
  #[arg(long)]
  pub check: bool,

  /// Path to config file (default: .addcopyright.toml in the scan root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors and the check report
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Run the tool with the given arguments.
pub fn run(cli: Cli) -> Result<()> {
  init_tracing(cli.quiet, cli.verbose);

  if cli.verbose > 0 {
    set_verbose();
  } else if cli.quiet {
    set_quiet();
  }
  cli.colors.apply();

  if !cli.root.is_dir() {
    eprintln!("ERROR: {} is not a directory", cli.root.display());
    process::exit(1);
  }

  let config = load_config(cli.config.as_deref(), &cli.root, cli.no_config)?;
  let detector = MarkerDetector::new()?;
  let scanner = TreeScanner::new(&cli.root, &config.excluded_dirs)?;

  if cli.check {
    run_check(&cli.root, &config, &scanner, &detector)
  } else {
    run_insert(&cli.root, &config, &scanner, &detector)
  }
}

/// Check mode: one pass per pair, counting files without the marker.
///
/// Exits non-zero iff at least one file is missing the header.
fn run_check(root: &Path, config: &RunConfig, scanner: &TreeScanner, detector: &MarkerDetector) -> Result<()> {
  let mut report = CheckReport::default();

  for pair in &config.pairs {
    debug!("Checking pair ({}, {})", pair.glob, pair.prefix);

    for path in scanner.find(&pair.glob)? {
      report.checked += 1;

      match read_text(&path) {
        Ok(content) => {
          if !detector.has_marker(&content) {
            output::report_missing(&output::display_path(&path, root));
            report.missing += 1;
          }
        }
        Err(e) => {
          warn!("{e:#}");
          report.errors += 1;
        }
      }
    }
  }

  output::print_check_summary(&report);

  if report.missing > 0 {
    process::exit(1);
  }

  Ok(())
}

/// Insertion mode: one pass per pair, rewriting files that lack the marker.
///
/// Per-file failures are reported and counted; the rest of the run continues.
fn run_insert(root: &Path, config: &RunConfig, scanner: &TreeScanner, detector: &MarkerDetector) -> Result<()> {
  let mut report = InsertReport::default();

  for pair in &config.pairs {
    debug!("Inserting for pair ({}, {})", pair.glob, pair.prefix);

    // The header block is recomputed per pass; it only depends on the prefix.
    let header = HeaderBlock::compose(&pair.prefix);
    let mutator = FileMutator::new(&header, &pair.prefix, detector);

    for path in scanner.find(&pair.glob)? {
      match mutator.apply(&path) {
        Ok(MutateOutcome::Inserted) => {
          report.inserted += 1;
          info_log!("Added copyright header to: {}", output::display_path(&path, root));
        }
        Ok(MutateOutcome::AlreadyPresent) => {
          report.already_present += 1;
        }
        Err(e) => {
          report.errors += 1;
          eprintln!("Error processing {}: {:#}", output::display_path(&path, root), e);
        }
      }
    }
  }

  output::print_insert_summary(&report);

  if report.errors > 0 {
    process::exit(1);
  }

  Ok(())
}
