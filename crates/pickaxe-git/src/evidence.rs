// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Added-line evidence extraction from unified diffs
//!
//! The pickaxe query only proves that the number of occurrences of a string
//! changed. Scanning the diff for added lines that contain the string is what
//! shows it was introduced rather than removed.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// File name used before any `+++` header has been seen
pub const UNKNOWN_FILE: &str = "Unknown File";

/// Header announcing the post-image path of a file
const NEW_FILE_HEADER: &str = "+++ b/";

/// Same header when git quotes a path with unusual characters
const NEW_FILE_HEADER_QUOTED: &str = "+++ \"b/";

/// Prefix shared by every per-file header line on the added side
const HEADER_MARKER: &str = "+++";

/// Single-character marker for an added line
const ADDITION_MARKER: char = '+';

/// Placeholder shown instead of added content that was not valid text
pub const BINARY_PLACEHOLDER: &str = "[Binary content change]";

/// A line added by a commit that contains the search string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceLine {
    /// Path of the file the line was added to
    pub file: String,
    /// The diff line, including its leading `+`
    pub raw_line: String,
    /// The line held bytes that were not valid UTF-8
    pub binary: bool,
}

impl EvidenceLine {
    /// Text to show for this line, the placeholder for binary content
    #[must_use]
    pub fn display_text(&self) -> &str {
        if self.binary {
            BINARY_PLACEHOLDER
        } else {
            &self.raw_line
        }
    }
}

/// Collect every added line in `diff_body` that contains `search`
///
/// Lines keep diff order. Removed and context lines never match, nor do
/// `Binary files ... differ` notices. Lines that are not valid UTF-8 are
/// decoded lossily and flagged as binary.
#[must_use]
pub fn extract_evidence(diff_body: impl AsRef<[u8]>, search: &str) -> Vec<EvidenceLine> {
    let mut evidence = Vec::new();
    let mut current_file = UNKNOWN_FILE.to_string();

    for bytes in diff_body.as_ref().split(|&b| b == b'\n') {
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        // only allocates when invalid sequences had to be replaced
        let line = String::from_utf8_lossy(bytes);

        if let Some(path) = new_file_path(&line) {
            current_file = path;
        } else if is_added_line(&line) && line.contains(search) {
            evidence.push(EvidenceLine {
                file: current_file.clone(),
                binary: matches!(line, Cow::Owned(_)),
                raw_line: line.into_owned(),
            });
        }
    }

    evidence
}

/// True for `+content` lines, false for `+++` file headers
#[must_use]
pub fn is_added_line(line: &str) -> bool {
    line.starts_with(ADDITION_MARKER) && !line.starts_with(HEADER_MARKER)
}

fn new_file_path(line: &str) -> Option<String> {
    if let Some(path) = line.strip_prefix(NEW_FILE_HEADER) {
        return Some(path.to_string());
    }
    line.strip_prefix(NEW_FILE_HEADER_QUOTED)
        .map(|path| unquote_path(path.strip_suffix('"').unwrap_or(path)))
}

/// Undo git's C-style path quoting: `\"`, `\\`, control escapes and
/// three-digit octal bytes
fn unquote_path(quoted: &str) -> String {
    let input = quoted.as_bytes();
    let mut out = Vec::with_capacity(input.len());
    let mut idx = 0;

    while idx < input.len() {
        let byte = input[idx];
        idx += 1;
        if byte != b'\\' || idx == input.len() {
            out.push(byte);
            continue;
        }

        let escaped = input[idx];
        idx += 1;
        match escaped {
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            b'0'..=b'3' => match input.get(idx..idx + 2) {
                Some(&[hi, lo]) if is_octal(hi) && is_octal(lo) => {
                    out.push((escaped - b'0') * 64 + (hi - b'0') * 8 + (lo - b'0'));
                    idx += 2;
                }
                _ => out.extend_from_slice(&[b'\\', escaped]),
            },
            other => out.push(other),
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn is_octal(byte: u8) -> bool {
    (b'0'..=b'7').contains(&byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn line(file: &str, raw: &str) -> EvidenceLine {
        EvidenceLine {
            file: file.to_string(),
            raw_line: raw.to_string(),
            binary: false,
        }
    }

    #[test]
    fn test_single_added_line() {
        let evidence = extract_evidence("+++ b/file.txt\n+hello world\n", "hello");
        assert_eq!(evidence, vec![line("file.txt", "+hello world")]);
    }

    #[test]
    fn test_removed_line_is_not_evidence() {
        let evidence = extract_evidence("+++ b/file.txt\n-hello world\n", "hello");
        assert!(evidence.is_empty());
    }

    #[test]
    fn test_context_line_is_not_evidence() {
        let evidence = extract_evidence("+++ b/file.txt\n hello world\n+other\n", "hello");
        assert!(evidence.is_empty());
    }

    #[test]
    fn test_header_containing_search_is_not_evidence() {
        let diff = "diff --git a/hello.rs b/hello.rs\n--- a/hello.rs\n+++ b/hello.rs\n@@ -0,0 +1 @@\n+fn main() {}\n";
        assert!(extract_evidence(diff, "hello").is_empty());
    }

    #[test]
    fn test_file_context_tracks_headers() {
        let diff = "\
diff --git a/a.txt b/a.txt
--- a/a.txt
+++ b/a.txt
@@ -1 +1,2 @@
 keep
+needle one
diff --git a/dir/b.txt b/dir/b.txt
--- a/dir/b.txt
+++ b/dir/b.txt
@@ -1 +1 @@
-needle gone
+needle two
";
        let evidence = extract_evidence(diff, "needle");
        assert_eq!(
            evidence,
            vec![line("a.txt", "+needle one"), line("dir/b.txt", "+needle two")]
        );
    }

    #[test]
    fn test_unknown_file_before_header() {
        let evidence = extract_evidence("+needle\n", "needle");
        assert_eq!(evidence, vec![line(UNKNOWN_FILE, "+needle")]);
    }

    #[test]
    fn test_deleted_file_header_keeps_previous_file() {
        let diff = "+++ b/kept.txt\n+needle\n--- a/old.txt\n+++ /dev/null\n-needle\n";
        let evidence = extract_evidence(diff, "needle");
        assert_eq!(evidence, vec![line("kept.txt", "+needle")]);
    }

    #[test]
    fn test_quoted_path_is_unquoted() {
        let diff = "+++ \"b/with \\\"quote\\\".txt\"\n+needle\n";
        let evidence = extract_evidence(diff, "needle");
        assert_eq!(evidence[0].file, "with \"quote\".txt");
    }

    #[test]
    fn test_quoted_path_octal_and_control_escapes() {
        let diff = "+++ \"b/caf\\303\\251\\tnotes\\\\x.txt\"\n+needle\n";
        let evidence = extract_evidence(diff, "needle");
        assert_eq!(evidence[0].file, "caf\u{e9}\tnotes\\x.txt");
    }

    #[test]
    fn test_unquote_keeps_incomplete_escapes() {
        assert_eq!(unquote_path("a\\1b"), "a\\1b");
        assert_eq!(unquote_path("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_binary_notice_is_not_evidence() {
        let diff = "diff --git a/img.png b/img.png\nBinary files a/img.png and b/img.png differ\n";
        assert!(extract_evidence(diff, "img").is_empty());
    }

    #[test]
    fn test_invalid_bytes_marked_binary() {
        let diff: &[u8] = b"+++ b/blob.bin\n+needle\xff\xfe\n";
        let evidence = extract_evidence(diff, "needle");
        assert_eq!(evidence.len(), 1);
        assert!(evidence[0].binary);
        assert_eq!(evidence[0].display_text(), BINARY_PLACEHOLDER);
        assert!(evidence[0].raw_line.starts_with('+'));
    }

    #[test]
    fn test_replacement_character_in_text_is_not_binary() {
        let diff = "+++ b/notes.txt\n+needle \u{FFFD} stays text\n";
        let evidence = extract_evidence(diff, "needle");
        assert_eq!(evidence, vec![line("notes.txt", "+needle \u{FFFD} stays text")]);
    }

    #[test]
    fn test_crlf_line_endings_trimmed() {
        let evidence = extract_evidence("+++ b/dos.txt\r\n+needle one\r\n", "needle");
        assert_eq!(evidence, vec![line("dos.txt", "+needle one")]);
    }

    #[test]
    fn test_added_line_starting_with_double_plus() {
        // `++i` added to a C file renders as `+++i` and is treated as a header
        assert!(!is_added_line("+++i;"));
        assert!(is_added_line("++i;"));
        assert!(is_added_line("+"));
        assert!(!is_added_line(" +x"));
    }

    #[test]
    fn test_display_text_for_text_line() {
        let evidence = line("a", "+needle");
        assert_eq!(evidence.display_text(), "+needle");
    }
}
