// ==========================================
// Test helpers
// ==========================================
// Temp-database creation and raw-SQL assertions shared by the integration
// tests.
// ==========================================

use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

use bom_costing::db::{configure_sqlite_connection, init_schema};

/// Create a temp database file with the full schema applied.
///
/// Returns the NamedTempFile (keep it alive for the duration of the test)
/// and the database path.
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("temp path is not valid UTF-8")?
        .to_string();

    let conn = Connection::open(&db_path)?;
    configure_sqlite_connection(&conn)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// Count rows of a table through a fresh connection, bypassing the
/// repositories on purpose.
pub fn count_rows(db_path: &str, table: &str) -> i64 {
    let conn = Connection::open(db_path).expect("open assertion connection");
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    conn.query_row(&sql, [], |row| row.get(0))
        .expect("count query")
}
