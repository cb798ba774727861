//! SQLite transcript store implementation.
//!
//! Implements `TranscriptStore` from `rehearse-core` using sqlx with the
//! split read/write pool. Question/answer/feedback lists persist as JSON
//! columns; timestamps as RFC 3339 TEXT so malformed historical rows can
//! still be listed.

use sqlx::Row;
use uuid::Uuid;

use rehearse_core::transcript::store::TranscriptStore;
use rehearse_types::error::StoreError;
use rehearse_types::transcript::TranscriptRecord;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `TranscriptStore`.
pub struct SqliteTranscriptStore {
    pool: DatabasePool,
}

impl SqliteTranscriptStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct TranscriptRow {
    id: String,
    participant: String,
    job_title: String,
    model: String,
    questions: String,
    answers: String,
    feedback: String,
    evaluation: String,
    created_at: String,
}

impl TranscriptRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            participant: row.try_get("participant")?,
            job_title: row.try_get("job_title")?,
            model: row.try_get("model")?,
            questions: row.try_get("questions")?,
            answers: row.try_get("answers")?,
            feedback: row.try_get("feedback")?,
            evaluation: row.try_get("evaluation")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_entry(self) -> Result<(Uuid, TranscriptRecord), StoreError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| StoreError::Query(format!("invalid transcript id: {e}")))?;
        let questions = parse_json_list(&self.questions)?;
        let answers = parse_json_list(&self.answers)?;
        let feedback: Vec<Option<String>> = serde_json::from_str(&self.feedback)
            .map_err(|e| StoreError::Serialization(format!("invalid feedback column: {e}")))?;

        Ok((
            id,
            TranscriptRecord {
                participant: self.participant,
                job_title: self.job_title,
                questions,
                answers,
                feedback,
                evaluation: self.evaluation,
                model: self.model,
                timestamp: self.created_at,
            },
        ))
    }
}

fn parse_json_list(raw: &str) -> Result<Vec<String>, StoreError> {
    serde_json::from_str(raw)
        .map_err(|e| StoreError::Serialization(format!("invalid list column: {e}")))
}

fn to_json(value: &impl serde::Serialize) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn map_sqlx(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Connection
        }
        other => StoreError::Query(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// TranscriptStore implementation
// ---------------------------------------------------------------------------

impl TranscriptStore for SqliteTranscriptStore {
    async fn append(&self, record: &TranscriptRecord) -> Result<Uuid, StoreError> {
        let id = Uuid::now_v7();

        sqlx::query(
            r#"INSERT INTO transcripts (id, participant, job_title, model, questions, answers, feedback, evaluation, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(id.to_string())
        .bind(&record.participant)
        .bind(&record.job_title)
        .bind(&record.model)
        .bind(to_json(&record.questions)?)
        .bind(to_json(&record.answers)?)
        .bind(to_json(&record.feedback)?)
        .bind(&record.evaluation)
        .bind(&record.timestamp)
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx)?;

        Ok(id)
    }

    async fn list(&self) -> Result<Vec<(Uuid, TranscriptRecord)>, StoreError> {
        let rows = sqlx::query("SELECT * FROM transcripts")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_sqlx)?;

        rows.iter()
            .map(|row| {
                TranscriptRow::from_row(row)
                    .map_err(map_sqlx)
                    .and_then(TranscriptRow::into_entry)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> (tempfile::TempDir, SqliteTranscriptStore) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, SqliteTranscriptStore::new(pool))
    }

    fn record() -> TranscriptRecord {
        TranscriptRecord {
            participant: "Ada".to_string(),
            job_title: "Backend Engineer".to_string(),
            questions: vec!["Q1".to_string(), "Q2".to_string()],
            answers: vec!["A1".to_string(), "A2".to_string()],
            feedback: vec![Some("F1".to_string()), None],
            evaluation: "Strong fundamentals.".to_string(),
            model: "z-ai/glm-4.5-air".to_string(),
            timestamp: "2026-08-06T12:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_append_then_list_roundtrip() {
        let (_dir, store) = test_store().await;

        let id = store.append(&record()).await.unwrap();
        let listed = store.list().await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].0, id);
        assert_eq!(listed[0].1, record());
    }

    #[tokio::test]
    async fn test_append_assigns_unique_ids() {
        let (_dir, store) = test_store().await;

        let first = store.append(&record()).await.unwrap();
        let second = store.append(&record()).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_tolerates_malformed_timestamp() {
        let (_dir, store) = test_store().await;

        let mut rec = record();
        rec.timestamp = "definitely-not-a-date".to_string();
        store.append(&rec).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].1.timestamp, "definitely-not-a-date");
        assert!(listed[0].1.parsed_timestamp().is_none());
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let (_dir, store) = test_store().await;
        assert!(store.list().await.unwrap().is_empty());
    }
}
