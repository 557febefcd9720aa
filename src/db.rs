//! SQLite pool setup for the local climb store.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::error::{CatalogError, Result};

/// Configure SQLite pragmas. Set per-connection via the after_connect
/// callback.
async fn configure_sqlite_pragmas(
    conn: &mut sqlx::SqliteConnection,
) -> std::result::Result<(), sqlx::Error> {
    use sqlx::Executor;

    // WAL allows concurrent reads while a fetch completion is writing
    conn.execute("PRAGMA journal_mode = WAL").await?;
    conn.execute("PRAGMA synchronous = NORMAL").await?;
    // 5 second timeout for busy connections
    conn.execute("PRAGMA busy_timeout = 5000").await?;
    conn.execute("PRAGMA foreign_keys = ON").await?;

    Ok(())
}

/// Open (creating if needed) the catalog database under `data_dir` and run
/// embedded migrations.
pub async fn init_db(data_dir: &Path) -> Result<SqlitePool> {
    std::fs::create_dir_all(data_dir).map_err(|e| {
        CatalogError::persistence(format!(
            "failed to create data dir {}: {e}",
            data_dir.display()
        ))
    })?;

    let db_path = data_dir.join("catalog.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::info!(url = %db_url, "opening catalog database");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                configure_sqlite_pragmas(conn).await?;
                Ok(())
            })
        })
        .connect(&db_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    tracing::info!(path = %db_path.display(), "catalog database ready");
    Ok(pool)
}
