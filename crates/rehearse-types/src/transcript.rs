//! Persisted transcript records for completed interviews.
//!
//! A `TranscriptRecord` is created exactly once, at the moment a session
//! completes, and is immutable thereafter. The serialized field names are
//! the store wire format; the timestamp is kept as a raw RFC 3339 string so
//! the read path can tolerate malformed history rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One finalized interview, as written to the transcript store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    /// Participant display name; sessions without one record "Anonymous".
    pub participant: String,
    pub job_title: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    /// Positionally aligned with `answers`; `None` where feedback
    /// generation failed for that turn.
    pub feedback: Vec<Option<String>>,
    pub evaluation: String,
    pub model: String,
    /// RFC 3339 UTC creation time.
    pub timestamp: String,
}

impl TranscriptRecord {
    /// Parse the creation timestamp, if well-formed.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Human-readable timestamp for display, falling back to the raw
    /// string when it fails to parse.
    pub fn display_timestamp(&self) -> String {
        match self.parsed_timestamp() {
            Some(dt) => dt.format("%B %d, %Y at %I:%M %p").to_string(),
            None => self.timestamp.clone(),
        }
    }
}
