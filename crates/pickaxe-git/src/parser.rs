// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Pickaxe log parsing
//!
//! The log source prints one record per commit:
//!
//! ```text
//! <separator>
//! <hash>
//! <committer date, ISO 8601>
//! <author name>
//! <subject>
//! <unified diff ...>
//! ```
//!
//! A record starts only at a line consisting exactly of the separator. Diff
//! content lines always begin with a marker character or a header keyword, so
//! they never equal the separator. A commit subject that is exactly the
//! separator would break framing; that is an accepted limitation.

use tracing::{debug, warn};

use crate::commit::CommitRecord;
use crate::error::ParseError;

/// Line that precedes every commit record in the log
pub const RECORD_SEPARATOR: &str = "\u{1e}PICKAXE-COMMIT\u{1e}";

/// `--pretty` format producing [`RECORD_SEPARATOR`]-framed records
///
/// `%x1e` is git's escape for the record separator control character.
pub const LOG_FORMAT: &str = "format:%x1ePICKAXE-COMMIT%x1e%n%H%n%cI%n%an%n%s";

/// Characters of a malformed chunk quoted in warnings
const EXCERPT_CHARS: usize = 500;

/// Split a raw pickaxe log into commit records
///
/// Header fields are decoded lossily; diff bodies stay as raw bytes.
/// Malformed chunks are logged and dropped; this never fails.
#[must_use]
pub fn parse_log(raw: impl AsRef<[u8]>, separator: &str) -> Vec<CommitRecord> {
    let chunks = split_records(raw.as_ref(), separator);
    debug!(chunks = chunks.len(), "Split pickaxe log into chunks");

    chunks
        .into_iter()
        .filter_map(|chunk| match parse_record(chunk) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(
                    error = %e,
                    chunk = %excerpt(&String::from_utf8_lossy(chunk)),
                    "Skipping malformed commit chunk"
                );
                None
            }
        })
        .collect()
}

/// Split the raw log on separator lines, discarding blank chunks
///
/// Text before the first separator is an artifact of the log layout and is
/// dropped when blank.
#[must_use]
pub fn split_records<'a>(raw: &'a [u8], separator: &str) -> Vec<&'a [u8]> {
    let separator = separator.as_bytes();
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in raw.split_inclusive(|&b| b == b'\n') {
        if trim_line_end(line) == separator {
            chunks.push(&raw[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }
    chunks.push(&raw[start..]);

    chunks
        .into_iter()
        .filter(|chunk| !chunk.iter().all(u8::is_ascii_whitespace))
        .collect()
}

/// Decode one chunk into a [`CommitRecord`]
///
/// The chunk is split on its first four line breaks only, so the diff body
/// keeps every line it contains.
///
/// # Errors
///
/// Returns `ParseError::MissingFields` when fewer than five segments are
/// present and `ParseError::EmptyHash` when the hash line is blank.
pub fn parse_record(chunk: impl AsRef<[u8]>) -> Result<CommitRecord, ParseError> {
    let trimmed = trim_line_end(trim_line_start(chunk.as_ref()));

    let parts: Vec<&[u8]> = trimmed.splitn(5, |&b| b == b'\n').collect();
    let [hash, timestamp_raw, author, subject, diff_body] = parts[..] else {
        return Err(ParseError::MissingFields { found: parts.len() });
    };

    let hash = String::from_utf8_lossy(hash);
    let hash = hash.trim();
    if hash.is_empty() {
        return Err(ParseError::EmptyHash);
    }

    let record = CommitRecord::new(
        hash,
        String::from_utf8_lossy(timestamp_raw).trim(),
        String::from_utf8_lossy(trim_line_end(author)),
        String::from_utf8_lossy(trim_line_end(subject)),
        diff_body,
    );
    if record.timestamp.is_none() {
        warn!(
            hash = %record.hash,
            date = %record.timestamp_raw,
            "Could not parse commit date, keeping raw value"
        );
    }

    Ok(record)
}

fn trim_line_start(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| !matches!(b, b'\n' | b'\r'))
        .unwrap_or(bytes.len());
    &bytes[start..]
}

fn trim_line_end(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| !matches!(b, b'\n' | b'\r'))
        .map_or(0, |idx| idx + 1);
    &bytes[..end]
}

/// First [`EXCERPT_CHARS`] characters of a chunk, for diagnostics
fn excerpt(chunk: &str) -> String {
    match chunk.char_indices().nth(EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &chunk[..idx]),
        None => chunk.to_string(),
    }
}
