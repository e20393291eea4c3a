use crate::error::CoreError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub use sqlx::SqlitePool as DbPool;

/// Opens (creating if needed) the task store at `db_path` and brings its
/// schema up to date.
///
/// Missing parent directories are created. The store runs in WAL mode so a
/// `list` can read while another `eisen` process writes.
pub async fn establish_connection(db_path: &str) -> Result<DbPool, CoreError> {
    let path = Path::new(db_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    debug!(db_path, "task store ready");

    Ok(pool)
}
