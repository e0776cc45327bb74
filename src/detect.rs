//! # Detection Module
//!
//! This module contains the interface and default implementation for deciding
//! whether a file already carries the copyright header. Keeping it behind a
//! trait allows the detection strategy to be replaced without touching the
//! rewrite or check paths.

use anyhow::{Context, Result};
use regex::Regex;

use crate::header::MARKER_PATTERN;

/// Trait for copyright detectors.
///
/// Implementations report whether a chunk of content (a single line or a
/// whole file) contains a recognizable copyright marker.
pub trait CopyrightDetector: Send + Sync {
  /// Returns `true` if `content` contains the marker.
  fn has_marker(&self, content: &str) -> bool;
}

/// Default detector backed by a fixed regular expression.
///
/// The marker matches on text content, not comment syntax, and may appear
/// anywhere in the file — a header placed manually, in any comment style,
/// still counts as present. This keeps repeated runs from stacking headers.
pub struct MarkerDetector {
  marker: Regex,
}

impl MarkerDetector {
  /// Creates a detector for the built-in marker.
  pub fn new() -> Result<Self> {
    Self::with_pattern(MARKER_PATTERN)
  }

  /// Creates a detector for an arbitrary marker pattern.
  pub fn with_pattern(pattern: &str) -> Result<Self> {
    let marker = Regex::new(pattern).with_context(|| format!("Invalid marker pattern: {pattern}"))?;
    Ok(Self { marker })
  }
}

impl CopyrightDetector for MarkerDetector {
  fn has_marker(&self, content: &str) -> bool {
    self.marker.is_match(content)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn detector() -> MarkerDetector {
    MarkerDetector::new().expect("builtin marker compiles")
  }

  #[test]
  fn test_detects_marker_at_top() {
    let content = "// Copyright (c) 2018, Enrico Gregori, Alessandro Improta, Luca Sani, Institute\nint main(void);\n";
    assert!(detector().has_marker(content));
  }

  #[test]
  fn test_detects_marker_deep_in_file() {
    // A manually placed header far from the top still counts.
    let content = format!(
      "{}\n# Copyright (c) 2018, Enrico Gregori, Alessandro Improta, Luca Sani, Institute\n",
      "x = 1\n".repeat(200)
    );
    assert!(detector().has_marker(&content));
  }

  #[test]
  fn test_detects_marker_regardless_of_comment_style() {
    let content = "-- Copyright (c) 2018, Enrico Gregori, Alessandro Improta, Luca Sani, Institute\n";
    assert!(detector().has_marker(content));
  }

  #[test]
  fn test_other_copyright_notices_do_not_match() {
    let content = "// Copyright (c) 2020, Somebody Else. All rights reserved.\n";
    assert!(!detector().has_marker(content));
  }

  #[test]
  fn test_with_pattern_rejects_invalid_regex() {
    assert!(MarkerDetector::with_pattern("(unclosed").is_err());
  }
}
