//! TranscriptStore trait definition and the no-op null store.
//!
//! The store is an append-only sink: one record per completed interview,
//! assigned a unique id at write time, never mutated or deleted. Uses
//! native async fn in traits (RPITIT, Rust 2024 edition).

use rehearse_types::error::StoreError;
use rehearse_types::transcript::TranscriptRecord;
use uuid::Uuid;

/// Repository trait for finished interview transcripts.
///
/// Implementations live in `rehearse-infra` (e.g. `SqliteTranscriptStore`).
pub trait TranscriptStore: Send + Sync {
    /// Append one immutable record, returning its store-assigned id.
    fn append(
        &self,
        record: &TranscriptRecord,
    ) -> impl std::future::Future<Output = Result<Uuid, StoreError>> + Send;

    /// All stored records, keyed by id, in no particular order.
    ///
    /// Callers sort for display (see [`super::sort_newest_first`]).
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<(Uuid, TranscriptRecord)>, StoreError>> + Send;
}

impl<T: TranscriptStore> TranscriptStore for &T {
    async fn append(&self, record: &TranscriptRecord) -> Result<Uuid, StoreError> {
        (**self).append(record).await
    }

    async fn list(&self) -> Result<Vec<(Uuid, TranscriptRecord)>, StoreError> {
        (**self).list().await
    }
}

/// Store used when persistence is unconfigured.
///
/// Completing an interview never depends on the store, so the null
/// implementation simply drops records on the floor (with a debug log)
/// and reports an empty history.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTranscriptStore;

impl TranscriptStore for NullTranscriptStore {
    async fn append(&self, record: &TranscriptRecord) -> Result<Uuid, StoreError> {
        tracing::debug!(
            job_title = %record.job_title,
            "transcript store unconfigured, record not persisted"
        );
        Ok(Uuid::now_v7())
    }

    async fn list(&self) -> Result<Vec<(Uuid, TranscriptRecord)>, StoreError> {
        Ok(Vec::new())
    }
}
