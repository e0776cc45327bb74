//! # Scanner Module
//!
//! This module walks the tree under a root directory and yields the files
//! whose name matches a filename glob. Excluded directories are pruned before
//! descent, so nothing below them is ever visited and the walk cost is
//! proportional to the surviving tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Walks a root directory, pruning excluded directory names.
///
/// One scanner serves every (glob, prefix) pass of a run; the exclusion
/// patterns are compiled once at construction.
pub struct TreeScanner {
  root: PathBuf,
  excluded: Vec<glob::Pattern>,
}

impl TreeScanner {
  /// Creates a scanner for `root` with the given directory-name globs.
  pub fn new(root: &Path, excluded_dirs: &[String]) -> Result<Self> {
    let excluded = excluded_dirs
      .iter()
      .map(|pattern| {
        glob::Pattern::new(pattern).with_context(|| format!("Invalid excluded directory pattern: {pattern}"))
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      root: root.to_path_buf(),
      excluded,
    })
  }

  /// Returns the files under the root whose filename matches `filename_glob`,
  /// sorted for reproducible output across a run.
  ///
  /// Unreadable entries are logged and skipped. Symlinks are not followed.
  pub fn find(&self, filename_glob: &str) -> Result<Vec<PathBuf>> {
    let pattern =
      glob::Pattern::new(filename_glob).with_context(|| format!("Invalid filename glob: {filename_glob}"))?;

    debug!("Scanning {} for {}", self.root.display(), filename_glob);

    let mut files = Vec::new();
    let walker = WalkDir::new(&self.root)
      .follow_links(false)
      .into_iter()
      .filter_entry(|entry| !self.prune(entry));

    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Skipping unreadable entry: {}", e);
          continue;
        }
      };

      if !entry.file_type().is_file() {
        continue;
      }

      let name = entry.file_name().to_string_lossy();
      if pattern.matches(&name) {
        files.push(entry.into_path());
      }
    }

    files.sort();

    debug!("Matched {} files for {}", files.len(), filename_glob);

    Ok(files)
  }

  /// Whether the walk should not descend into `entry`.
  ///
  /// Only directory names are matched; the root itself (depth 0) is never
  /// pruned even if its name matches an exclusion pattern.
  fn prune(&self, entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
      return false;
    }

    let name = entry.file_name().to_string_lossy();
    self.excluded.iter().any(|pattern| pattern.matches(&name))
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "").expect("write file");
  }

  fn scanner(root: &Path, excluded: &[&str]) -> TreeScanner {
    let excluded: Vec<String> = excluded.iter().map(|s| (*s).to_string()).collect();
    TreeScanner::new(root, &excluded).expect("valid patterns")
  }

  #[test]
  fn test_find_matches_filename_glob() {
    let temp_dir = TempDir::new().expect("create temp dir");
    touch(temp_dir.path(), "main.c");
    touch(temp_dir.path(), "util.h");
    touch(temp_dir.path(), "notes.txt");

    let files = scanner(temp_dir.path(), &[]).find("*.c").expect("scan");

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("main.c"));
  }

  #[test]
  fn test_find_recurses_into_subdirectories() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let nested = temp_dir.path().join("src").join("core");
    fs::create_dir_all(&nested).expect("create dirs");
    touch(&nested, "deep.c");
    touch(temp_dir.path(), "top.c");

    let files = scanner(temp_dir.path(), &[]).find("*.c").expect("scan");

    assert_eq!(files.len(), 2);
  }

  #[test]
  fn test_find_results_are_sorted() {
    let temp_dir = TempDir::new().expect("create temp dir");
    touch(temp_dir.path(), "zeta.c");
    touch(temp_dir.path(), "alpha.c");
    touch(temp_dir.path(), "mid.c");

    let files = scanner(temp_dir.path(), &[]).find("*.c").expect("scan");

    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted);
  }

  #[test]
  fn test_excluded_directory_is_pruned() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let vendored = temp_dir.path().join("third_party").join("lib");
    fs::create_dir_all(&vendored).expect("create dirs");
    touch(&vendored, "vendored.c");
    touch(temp_dir.path(), "mine.c");

    let files = scanner(temp_dir.path(), &["third_party"]).find("*.c").expect("scan");

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("mine.c"));
  }

  #[test]
  fn test_excluded_directory_glob_matches_anywhere_in_tree() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let build_dir = temp_dir.path().join("src").join("build-debug");
    fs::create_dir_all(&build_dir).expect("create dirs");
    touch(&build_dir, "generated.c");
    touch(temp_dir.path(), "mine.c");

    let files = scanner(temp_dir.path(), &["build*"]).find("*.c").expect("scan");

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("mine.c"));
  }

  #[test]
  fn test_root_is_never_pruned() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let root = temp_dir.path().join("build");
    fs::create_dir_all(&root).expect("create dir");
    touch(&root, "inside.c");

    // Scanning a root that itself matches an exclusion pattern still works.
    let files = scanner(&root, &["build*"]).find("*.c").expect("scan");

    assert_eq!(files.len(), 1);
  }

  #[test]
  fn test_excluded_file_names_are_not_pruned() {
    let temp_dir = TempDir::new().expect("create temp dir");
    // Exclusion patterns apply to directory names only; a plain file whose
    // name matches one must still be visited.
    touch(temp_dir.path(), "builder.c");

    let files = scanner(temp_dir.path(), &["build*"]).find("*.c").expect("scan");

    assert_eq!(files.len(), 1);
  }

  #[test]
  fn test_invalid_filename_glob_is_an_error() {
    let temp_dir = TempDir::new().expect("create temp dir");
    assert!(scanner(temp_dir.path(), &[]).find("[").is_err());
  }
}
