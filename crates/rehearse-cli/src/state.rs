//! Application state wiring the infrastructure together.
//!
//! `AppState` resolves the data directory, loads the global config, and
//! opens the SQLite transcript store. A store that fails to open is not
//! fatal: the interview runs with the null store and simply is not saved.

use std::path::PathBuf;

use rehearse_infra::config::{load_global_config, resolve_data_dir};
use rehearse_infra::sqlite::pool::DatabasePool;
use rehearse_infra::sqlite::transcript::SqliteTranscriptStore;
use rehearse_types::config::GlobalConfig;

/// Shared application state for all CLI commands.
pub struct AppState {
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
    /// Absent when the database could not be opened; interviews then run
    /// unsaved against the null store.
    pub store: Option<SqliteTranscriptStore>,
}

impl AppState {
    /// Initialize the application state: data directory, config, store.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("rehearse.db").display()
        );
        let store = match DatabasePool::new(&db_url).await {
            Ok(pool) => Some(SqliteTranscriptStore::new(pool)),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "transcript store unavailable, interviews will not be saved"
                );
                None
            }
        };

        tracing::debug!(data_dir = %data_dir.display(), "application state initialized");

        Ok(Self {
            config,
            data_dir,
            store,
        })
    }
}
