//! Transcript persistence abstractions for Rehearse.
//!
//! Defines the `TranscriptStore` port that the infrastructure layer
//! implements, the no-op store used when persistence is unconfigured, and
//! the display-ordering helper for history listings.

pub mod store;

use rehearse_types::transcript::TranscriptRecord;
use uuid::Uuid;

/// Order records newest-first for display.
///
/// Records whose timestamp fails to parse sort after all parseable ones,
/// ordered among themselves by the raw string (descending) so the listing
/// stays stable even with malformed history rows.
pub fn sort_newest_first(records: &mut [(Uuid, TranscriptRecord)]) {
    records.sort_by(|(_, a), (_, b)| {
        match (a.parsed_timestamp(), b.parsed_timestamp()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.timestamp.cmp(&a.timestamp),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: &str) -> (Uuid, TranscriptRecord) {
        (
            Uuid::now_v7(),
            TranscriptRecord {
                participant: "Anonymous".to_string(),
                job_title: "Backend Engineer".to_string(),
                questions: vec![],
                answers: vec![],
                feedback: vec![],
                evaluation: String::new(),
                model: "m".to_string(),
                timestamp: timestamp.to_string(),
            },
        )
    }

    #[test]
    fn test_sorts_newest_first() {
        let mut records = vec![
            record("2026-08-01T09:00:00Z"),
            record("2026-08-06T09:00:00Z"),
            record("2026-08-03T09:00:00Z"),
        ];
        sort_newest_first(&mut records);

        let stamps: Vec<&str> = records.iter().map(|(_, r)| r.timestamp.as_str()).collect();
        assert_eq!(
            stamps,
            vec![
                "2026-08-06T09:00:00Z",
                "2026-08-03T09:00:00Z",
                "2026-08-01T09:00:00Z",
            ]
        );
    }

    #[test]
    fn test_malformed_timestamps_sort_last() {
        let mut records = vec![
            record("not-a-timestamp"),
            record("2026-08-06T09:00:00Z"),
            record(""),
            record("2026-08-01T09:00:00Z"),
        ];
        sort_newest_first(&mut records);

        let stamps: Vec<&str> = records.iter().map(|(_, r)| r.timestamp.as_str()).collect();
        assert_eq!(
            stamps,
            vec![
                "2026-08-06T09:00:00Z",
                "2026-08-01T09:00:00Z",
                "not-a-timestamp",
                "",
            ]
        );
    }
}
