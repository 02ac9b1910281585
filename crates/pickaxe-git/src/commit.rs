//! Commit records decoded from the pickaxe log

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Length of `YYYY-MM-DDTHH:MM:SS`, the shortest prefix an offset can follow
const DATETIME_PREFIX_LEN: usize = 19;

/// One commit chunk of the raw log, split into header fields and diff body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The full commit hash
    pub hash: String,
    /// Committer date exactly as git printed it
    pub timestamp_raw: String,
    /// Parsed committer date, `None` when `timestamp_raw` was not understood
    pub timestamp: Option<DateTime<FixedOffset>>,
    /// Author name
    pub author: String,
    /// First line of the commit message
    pub subject: String,
    /// Unified diff for every file touched by the commit, as git wrote it
    ///
    /// Kept as bytes so content that is not valid UTF-8 can be told apart
    /// from text when lines are decoded.
    pub diff_body: Vec<u8>,
}

impl CommitRecord {
    /// Build a record, parsing `timestamp_raw` on the way
    #[must_use]
    pub fn new(
        hash: impl Into<String>,
        timestamp_raw: impl Into<String>,
        author: impl Into<String>,
        subject: impl Into<String>,
        diff_body: impl Into<Vec<u8>>,
    ) -> Self {
        let timestamp_raw = timestamp_raw.into();
        let timestamp = parse_timestamp(&timestamp_raw);
        Self {
            hash: hash.into(),
            timestamp_raw,
            timestamp,
            author: author.into(),
            subject: subject.into(),
            diff_body: diff_body.into(),
        }
    }
}

/// Parse a git ISO-8601 date, tolerating the variants git and its users emit
///
/// Accepts `Z` (optionally preceded by a space) for UTC, offsets with or
/// without a colon, and a space in place of the `T` separator. Returns `None`
/// rather than failing.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let normalized = normalize_timestamp(raw);
    DateTime::parse_from_rfc3339(&normalized).ok()
}

/// Rewrite a git date into strict RFC 3339
///
/// Strings that cannot be repaired are returned trimmed but otherwise as-is,
/// so the caller's parse fails on them.
#[must_use]
pub fn normalize_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();

    let (base, offset) = if let Some(base) = trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
    {
        (base.trim_end(), "+00:00".to_string())
    } else {
        match split_offset(trimmed) {
            Some((base, offset)) => (base, offset),
            None => return trimmed.to_string(),
        }
    };

    let mut normalized = String::with_capacity(base.len() + offset.len());
    for (idx, c) in base.char_indices() {
        // date/time separator sits right after YYYY-MM-DD
        if idx == 10 && c == ' ' {
            normalized.push('T');
        } else {
            normalized.push(c);
        }
    }
    normalized.push_str(&offset);
    normalized
}

/// Split a trailing numeric offset off a date, returning it as `±HH:MM`
fn split_offset(value: &str) -> Option<(&str, String)> {
    let idx = value.rfind(['+', '-'])?;
    if idx < DATETIME_PREFIX_LEN {
        // the last sign belongs to the date, there is no offset
        return None;
    }
    let (base, offset) = value.split_at(idx);
    let (sign, digits) = offset.split_at(1);
    if !digits.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        2 => (digits, "00"),
        4 => digits.split_at(2),
        5 => (&digits[..2], &digits[3..]),
        _ => return None,
    };
    if (digits.len() == 5 && digits.as_bytes()[2] != b':')
        || !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit())
    {
        return None;
    }

    Some((base.trim_end(), format!("{sign}{hours}:{minutes}")))
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    proptest! {
        /// Property: git's strict format always parses back to the same instant
        #[test]
        fn prop_strict_format_roundtrip(
            secs in 0i64..4_000_000_000i64,
            offset_minutes in -840i32..=840i32,
        ) {
            let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap();
            let instant = Utc.timestamp_opt(secs, 0).unwrap().with_timezone(&offset);
            let raw = instant.format("%Y-%m-%dT%H:%M:%S%:z").to_string();
            prop_assert_eq!(parse_timestamp(&raw), Some(instant));
        }

        /// Property: dropping the colon from the offset does not change the result
        #[test]
        fn prop_colonless_offset_equivalent(
            secs in 0i64..4_000_000_000i64,
            offset_minutes in -840i32..=840i32,
        ) {
            let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap();
            let instant = Utc.timestamp_opt(secs, 0).unwrap().with_timezone(&offset);
            let raw = instant.format("%Y-%m-%dT%H:%M:%S%z").to_string();
            prop_assert_eq!(parse_timestamp(&raw), Some(instant));
        }

        /// Property: parsing never panics on arbitrary input
        #[test]
        fn prop_parse_timestamp_total(raw in ".*") {
            let _ = parse_timestamp(&raw);
        }
    }
}
