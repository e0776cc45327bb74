//! # Header Module
//!
//! This module holds the copyright notice and license body inserted into
//! source files, together with the composer that renders them as a comment
//! block for a given comment prefix.
//!
//! The two texts are kept separate because the rendered blocks are joined
//! with a blank comment line between them and a trailing blank line after
//! the license body, so inserted headers stay visually separated from the
//! surrounding code.

/// Regex source matched against file content to decide whether a header is
/// already present. Matches on text content, not comment syntax, so a header
/// commented in any style counts.
pub const MARKER_PATTERN: &str =
  r"Copyright \(c\) 2018, Enrico Gregori, Alessandro Improta, Luca Sani, Institute";

/// The copyright notice. The leading blank line renders as a bare comment
/// prefix at the top of the inserted block.
pub const COPYRIGHT_NOTICE: &str = r"
Copyright (c) 2018, Enrico Gregori, Alessandro Improta, Luca Sani, Institute
of Informatics and Telematics of the Italian National Research Council
(IIT-CNR). All rights reserved.";

/// The license body (3-clause BSD). The trailing newline renders as a bare
/// comment prefix closing the block.
pub const LICENSE_BODY: &str = r#"Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions are met:

1. Redistributions of source code must retain the above copyright notice,
this list of conditions and the following disclaimer.

2. Redistributions in binary form must reproduce the above copyright notice,
this list of conditions and the following disclaimer in the documentation
and/or other materials provided with the distribution.

3. Neither the name of the copyright holder nor the names of its contributors
may be used to endorse or promote products derived from this software without
specific prior written permission.

THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
ARE DISCLAIMED. IN NO EVENT SHALL THE IIT-CNR BE LIABLE FOR ANY DIRECT,
INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES
(INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES;
LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND
ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
(INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF
THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
"#;

/// Returns `text` with every line prefixed by `prefix` and a space.
///
/// Trailing whitespace is trimmed per line, so an empty input line renders as
/// the bare prefix rather than `prefix + " "`.
pub fn comment(text: &str, prefix: &str) -> String {
  text
    .split('\n')
    .map(|line| {
      let commented = format!("{prefix} {line}");
      commented.trim_end().to_string()
    })
    .collect::<Vec<_>>()
    .join("\n")
}

/// The commented header block for one file type, ready for insertion.
///
/// Recomputed for every (glob, prefix) pass; it has no identity beyond its
/// rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
  text: String,
}

impl HeaderBlock {
  /// Renders the copyright notice and license body for `prefix`.
  ///
  /// The notice block ends with a newline, the license block with a blank
  /// line, matching how the block is laid out when written into a file.
  pub fn compose(prefix: &str) -> Self {
    let copyright = comment(COPYRIGHT_NOTICE, prefix);
    let license = comment(LICENSE_BODY, prefix);
    Self {
      text: format!("{copyright}\n{license}\n\n"),
    }
  }

  /// The full block text as inserted into a file.
  pub fn text(&self) -> &str {
    &self.text
  }
}
