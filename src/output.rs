//! # Output Module
//!
//! This module centralizes the user-facing output of the tool.
//!
//! The one line check mode prints per missing file,
//! `<path> has no copyright message.`, is the scriptable contract and is
//! always written to stdout, quiet mode or not. Summaries and decoration
//! respect quiet mode and the color settings.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::is_quiet;

/// Symbols used in output
pub mod symbols {
  /// Success/all files annotated
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing header/failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Counters accumulated over a check run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckReport {
  /// Files inspected across all (glob, prefix) pairs.
  pub checked: usize,
  /// Files lacking the marker; drives the exit status.
  pub missing: usize,
  /// Files that could not be read or decoded.
  pub errors: usize,
}

/// Counters accumulated over an insertion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InsertReport {
  /// Files the header was inserted into.
  pub inserted: usize,
  /// Files that already carried the marker.
  pub already_present: usize,
  /// Files that could not be read, decoded, or rewritten.
  pub errors: usize,
}

/// Renders a path for display, relative to the scan root where possible.
pub fn display_path(path: &Path, root: &Path) -> String {
  if path.is_absolute()
    && let Some(relative) = pathdiff::diff_paths(path, root)
    && !relative.as_os_str().is_empty()
  {
    return relative.display().to_string();
  }
  path.display().to_string()
}

/// Prints the check-mode report line for one file missing the header.
pub fn report_missing(displayed_path: &str) {
  println!("{displayed_path} has no copyright message.");
}

/// Prints the end-of-run summary for check mode.
pub fn print_check_summary(report: &CheckReport) {
  if is_quiet() {
    return;
  }

  let files_word = if report.checked == 1 { "file" } else { "files" };

  if report.missing == 0 {
    println!(
      "{} All {} {} carry the copyright header",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      report.checked,
      files_word
    );
  } else {
    println!(
      "{} {} of {} {} missing the copyright header",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      report.missing,
      report.checked,
      files_word
    );
  }

  if report.errors > 0 {
    println!("{} {} could not be checked", symbols::FAILURE, report.errors);
  }
}

/// Prints the end-of-run summary for insertion mode.
pub fn print_insert_summary(report: &InsertReport) {
  if is_quiet() {
    return;
  }

  println!(
    "{} Added the copyright header to {} files ({} already had it)",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    report.inserted,
    report.already_present
  );

  if report.errors > 0 {
    println!(
      "{} {} files could not be processed",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      report.errors
    );
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn test_display_path_relativizes_against_root() {
    let root = PathBuf::from("/srv/project");
    let path = root.join("src").join("io.c");

    assert_eq!(display_path(&path, &root), "src/io.c");
  }

  #[test]
  fn test_display_path_keeps_relative_paths() {
    let root = PathBuf::from(".");
    let path = PathBuf::from("./src/io.c");

    assert_eq!(display_path(&path, &root), "./src/io.c");
  }

  #[test]
  fn test_display_path_root_itself() {
    let root = PathBuf::from("/srv/project");

    // Never collapse to an empty string.
    assert_eq!(display_path(&root, &root), "/srv/project");
  }
}
