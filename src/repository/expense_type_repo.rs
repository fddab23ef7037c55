// ==========================================
// BOM Costing Engine - expense type repository
// ==========================================
// CRUD over the expense_type nomenclature. Expense types are never deleted
// by the engine.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::ExpenseType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::sync::{Arc, Mutex};

pub struct ExpenseTypeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ExpenseTypeRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Build the repository on an existing shared connection.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Insert an expense type and return its assigned id.
    pub fn insert(&self, name: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute("INSERT INTO expense_type (name) VALUES (?1)", params![name])?;
        Ok(conn.last_insert_rowid())
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<ExpenseType>> {
        let conn = self.get_conn()?;
        let expense_type = conn
            .query_row(
                "SELECT id, name FROM expense_type WHERE id = ?1",
                params![id],
                |row| {
                    Ok(ExpenseType {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(expense_type)
    }

    pub fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM expense_type WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All expense types in insertion order.
    pub fn list_all(&self) -> RepositoryResult<Vec<ExpenseType>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM expense_type ORDER BY id")?;

        let expense_types = stmt
            .query_map([], |row| {
                Ok(ExpenseType {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<ExpenseType>>>()?;

        Ok(expense_types)
    }
}
