// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case number formatting and parsing.
//!
//! Sequential numbers follow `{prefix}-{year}-{sequence}` with the sequence
//! zero-padded to four digits. Sequences beyond 9999 widen the string
//! rather than erroring. Fallback identifiers follow
//! `CC-{timestampMillis}-{suffix}` and are issued when sequential numbering
//! is unavailable.

use serde::{Deserialize, Serialize};

/// Width the sequence component is zero-padded to.
const SEQUENCE_PAD_WIDTH: usize = 4;

/// Length of the random suffix on fallback identifiers.
const FALLBACK_SUFFIX_LEN: usize = 5;

/// Marker component leading every fallback identifier.
const FALLBACK_MARKER: &str = "CC";

/// A human-readable case identifier, unique across all case records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseNumber {
    /// The rendered value.
    value: String,
}

impl CaseNumber {
    /// Formats a sequential case number.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The rendered numbering prefix (e.g., "ACM-COL")
    /// * `year` - The calendar year partition
    /// * `sequence` - The allocated sequence number
    #[must_use]
    pub fn sequential(prefix: &str, year: u16, sequence: u64) -> Self {
        Self {
            value: format!("{prefix}-{year}-{sequence:0width$}", width = SEQUENCE_PAD_WIDTH),
        }
    }

    /// Formats a fallback identifier.
    ///
    /// Fallback identifiers are issued when firm or department metadata is
    /// missing, or when sequential allocation exhausted its retries.
    ///
    /// # Arguments
    ///
    /// * `timestamp_millis` - Milliseconds since the Unix epoch
    /// * `suffix` - A 5-character random suffix
    #[must_use]
    pub fn fallback(timestamp_millis: i128, suffix: &str) -> Self {
        Self {
            value: format!("{FALLBACK_MARKER}-{timestamp_millis}-{suffix}"),
        }
    }

    /// Wraps a persisted case number value.
    ///
    /// # Arguments
    ///
    /// * `value` - The stored value
    #[must_use]
    pub const fn from_value(value: String) -> Self {
        Self { value }
    }

    /// Returns the rendered value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the number, returning the rendered value.
    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }

    /// Extracts the sequence number if this case number belongs to the
    /// given prefix and year partition.
    ///
    /// Returns `None` for fallback identifiers, numbers from other
    /// partitions, and malformed suffixes. Used to seed a counter from
    /// pre-existing case records.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The rendered numbering prefix
    /// * `year` - The calendar year partition
    #[must_use]
    pub fn sequence_for(&self, prefix: &str, year: u16) -> Option<u64> {
        let pattern: String = format!("{prefix}-{year}-");
        let suffix: &str = self.value.strip_prefix(&pattern)?;
        if suffix.is_empty() {
            return None;
        }
        suffix.parse::<u64>().ok()
    }

    /// Returns whether this is a fallback identifier.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        let mut parts = self.value.splitn(3, '-');
        let marker: Option<&str> = parts.next();
        let millis: Option<&str> = parts.next();
        let suffix: Option<&str> = parts.next();
        match (marker, millis, suffix) {
            (Some(FALLBACK_MARKER), Some(millis), Some(suffix)) => {
                !millis.is_empty()
                    && millis.chars().all(|c| c.is_ascii_digit())
                    && suffix.len() == FALLBACK_SUFFIX_LEN
                    && suffix.chars().all(|c| c.is_ascii_alphanumeric())
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
