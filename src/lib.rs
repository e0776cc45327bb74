//! # addcopyright
//!
//! A tool that ensures source files carry the project copyright/license
//! header.
//!
//! `addcopyright` walks a source tree, finds files matching a configured set
//! of (filename glob, comment prefix) pairs, and inserts the commented header
//! as the first non-blank, non-shebang content of each file that lacks it.
//! Files that already carry the copyright marker — anywhere in the file, in
//! any comment style — are left untouched, so repeated runs are idempotent.
//!
//! ## Features
//!
//! * Recursive scan with vendor/build-like directories pruned before descent
//! * Header placed below shebang lines and pre-existing top-of-file comments
//! * Check mode for CI: reports files missing the header and fails the run
//! * Atomic in-place rewrites (temporary file + rename, no truncation on
//!   failure)
//! * Pair table and excluded directories overridable via `.addcopyright.toml`
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use addcopyright::config::RunConfig;
//! use addcopyright::detect::MarkerDetector;
//! use addcopyright::header::HeaderBlock;
//! use addcopyright::rewrite::FileMutator;
//! use addcopyright::scanner::TreeScanner;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = RunConfig::default();
//!     let detector = MarkerDetector::new()?;
//!     let scanner = TreeScanner::new(Path::new("."), &config.excluded_dirs)?;
//!
//!     for pair in &config.pairs {
//!         let header = HeaderBlock::compose(&pair.prefix);
//!         let mutator = FileMutator::new(&header, &pair.prefix, &detector);
//!         for path in scanner.find(&pair.glob)? {
//!             mutator.apply(&path)?;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`scanner`] - Directory walk with excluded-directory pruning
//! * [`header`] - Header texts and per-prefix comment rendering
//! * [`rewrite`] - Insertion-point selection and atomic in-place rewrite
//! * [`detect`] - Copyright marker detection
//!
//! [`scanner`]: crate::scanner
//! [`header`]: crate::header
//! [`rewrite`]: crate::rewrite
//! [`detect`]: crate::detect

// Re-export modules for public API
pub mod cli;
pub mod config;
pub mod detect;
pub mod header;
pub mod logging;
pub mod output;
pub mod rewrite;
pub mod scanner;
