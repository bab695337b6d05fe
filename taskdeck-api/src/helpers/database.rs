use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::database::Database;

/// Returns the path to the taskdeck database
///
/// An explicit `[database] path` in the config wins. Otherwise the file lives
/// in the platform data directory:
///
/// - **macOS**: `~/Library/Application Support/taskdeck/db.sqlite3`
/// - **Linux**: `~/.local/share/taskdeck/db.sqlite3`
/// - **Windows**: `%LOCALAPPDATA%\taskdeck\db.sqlite3`
pub fn get_db_path(config: &ApiConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = config.database.as_ref().and_then(|d| d.path.clone()) {
        return Ok(path);
    }

    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("taskdeck").join("db.sqlite3"))
}

/// Open the database and run migrations
pub fn initialize_database(config: &ApiConfig) -> anyhow::Result<Arc<Database>> {
    let db_path = get_db_path(config)?;
    let db = Database::new(&db_path)?;
    tracing::info!("Database initialized at: {}", db_path.display());
    Ok(Arc::new(db))
}
