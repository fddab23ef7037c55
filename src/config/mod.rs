// ==========================================
// BOM Costing Engine - configuration
// ==========================================
// Resolves where the database file lives. Everything else the engine needs
// arrives as explicit call arguments.
// ==========================================

use std::path::PathBuf;

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "BOM_COSTING_DB";

/// Database file name under the per-user data directory.
const DB_FILE_NAME: &str = "bom_costing.db";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
}

impl AppConfig {
    /// Resolve the configuration from the environment.
    ///
    /// Order: `BOM_COSTING_DB` if set, otherwise
    /// `<user data dir>/bom-costing/bom_costing.db`, otherwise the file in
    /// the working directory.
    pub fn from_env() -> Self {
        let database_path = std::env::var(DB_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(default_database_path);
        Self { database_path }
    }
}

/// Default database location under the per-user data directory.
pub fn default_database_path() -> String {
    let base = dirs::data_dir()
        .map(|d| d.join("bom-costing"))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(DB_FILE_NAME).to_string_lossy().into_owned()
}
