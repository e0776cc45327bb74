//! # Rewrite Module
//!
//! This module decides where the header belongs in a file and performs the
//! in-place rewrite. The rewrite is a pure insertion: every original line is
//! re-emitted in its original position, with the composed header written
//! immediately before the first line that is neither blank, a shebang, nor an
//! existing comment. The new content is materialized to a temporary file in
//! the target's directory and atomically renamed over the original, so a
//! mid-write failure never truncates the file.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::detect::CopyrightDetector;
use crate::header::HeaderBlock;

/// Returns `true` if `line` is all whitespace, a shebang, or a comment for
/// the given prefix.
///
/// Skippable lines are passed over when locating the insertion point, which
/// keeps the header below any shebang and any pre-existing top-of-file
/// comment block.
pub fn is_skippable(line: &str, prefix: &str) -> bool {
  let stripped = line.trim_start();
  stripped.is_empty() || stripped.starts_with("#!") || stripped.starts_with(prefix)
}

/// Outcome of one file rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutateOutcome {
  /// The header was inserted and the file rewritten.
  Inserted,
  /// The marker was already present; the file was left untouched.
  AlreadyPresent,
}

/// Inserts the composed header into files of one (glob, prefix) type.
pub struct FileMutator<'a> {
  header: &'a HeaderBlock,
  prefix: &'a str,
  detector: &'a dyn CopyrightDetector,
}

impl<'a> FileMutator<'a> {
  /// Creates a mutator for one pass. `prefix` must be the same comment
  /// leader `header` was composed with.
  pub fn new(header: &'a HeaderBlock, prefix: &'a str, detector: &'a dyn CopyrightDetector) -> Self {
    Self {
      header,
      prefix,
      detector,
    }
  }

  /// Ensures `path` carries the header, rewriting it in place if needed.
  pub fn apply(&self, path: &Path) -> Result<MutateOutcome> {
    let content = read_text(path)?;
    let (rewritten, outcome) = self.insert_header(&content);

    if outcome == MutateOutcome::Inserted {
      write_atomic(path, &rewritten)?;
    }

    Ok(outcome)
  }

  /// The line-sequence transform behind [`apply`](Self::apply).
  ///
  /// Streams the content line by line, tracking whether the marker has been
  /// seen. The header goes immediately before the first non-skippable line
  /// reached without the marker; once inserted (or once the marker is seen)
  /// no further insertion point is considered. A file that ends without any
  /// non-skippable line — empty, or comments and blanks only — gets the
  /// header appended at end-of-file instead.
  fn insert_header(&self, content: &str) -> (String, MutateOutcome) {
    let mut out = String::with_capacity(content.len() + self.header.text().len());
    let mut seen = false;
    let mut inserted = false;

    for line in content.split_inclusive('\n') {
      if !seen && self.detector.has_marker(line) {
        seen = true;
      }

      if !seen && !is_skippable(line, self.prefix) {
        out.push_str(self.header.text());
        seen = true;
        inserted = true;
      }

      out.push_str(line);
    }

    if !seen {
      out.push_str(self.header.text());
      inserted = true;
    }

    let outcome = if inserted {
      MutateOutcome::Inserted
    } else {
      MutateOutcome::AlreadyPresent
    };

    (out, outcome)
  }
}

/// Reads a file as UTF-8 text.
///
/// A file whose bytes are not valid UTF-8 fails here; the caller reports it
/// and moves on to the next file.
pub fn read_text(path: &Path) -> Result<String> {
  let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
  String::from_utf8(bytes).map_err(|_| anyhow::anyhow!("File is not valid UTF-8 text: {}", path.display()))
}

/// Writes `content` to a temporary file next to `path` and renames it into
/// place.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
  let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

  let mut tmp =
    tempfile::NamedTempFile::new_in(dir).with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

  tmp
    .write_all(content.as_bytes())
    .with_context(|| format!("Failed to write rewritten content for {}", path.display()))?;

  // NamedTempFile creates mode 0600 on unix; carry over the original mode so
  // executable scripts stay executable.
  let permissions = std::fs::metadata(path)
    .with_context(|| format!("Failed to stat file: {}", path.display()))?
    .permissions();
  tmp
    .as_file()
    .set_permissions(permissions)
    .with_context(|| format!("Failed to set permissions on rewritten {}", path.display()))?;

  tmp
    .persist(path)
    .with_context(|| format!("Failed to replace file: {}", path.display()))?;

  Ok(())
}
