// ==========================================
// BOM Costing Engine - material repositories
// ==========================================
// Two repositories over the material aggregate: master rows and the price
// history. Whether a material may be edited at all is decided above, in the
// usage guard; this layer only moves rows.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{Material, MaterialFields, MaterialPrice, PriceEntry, PriceListDiff};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{datetime_column, decimal_column};
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

// ==========================================
// MaterialRepository - master rows
// ==========================================
pub struct MaterialRepository {
    conn: Arc<Mutex<Connection>>,
}

fn material_from_row(row: &Row<'_>) -> rusqlite::Result<Material> {
    Ok(Material {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        unit_id: row.get(3)?,
        created_at: datetime_column(4, row.get::<_, String>(4)?)?,
        updated_at: datetime_column(5, row.get::<_, String>(5)?)?,
    })
}

impl MaterialRepository {
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

    /// Create a material together with its initial price history.
    ///
    /// One transaction covers the master row and every price row; the unit
    /// reference is checked inside it, so a vanished unit leaves nothing
    /// behind.
    pub fn create_with_prices(
        &self,
        fields: &MaterialFields,
        initial_prices: &[PriceEntry],
    ) -> RepositoryResult<i64> {
        let now = Utc::now().to_rfc3339();
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let unit_found: Option<i64> = tx
            .query_row(
                "SELECT 1 FROM unit WHERE id = ?1",
                params![fields.unit_id],
                |row| row.get(0),
            )
            .optional()?;
        if unit_found.is_none() {
            return Err(RepositoryError::not_found("Unit", fields.unit_id));
        }

        tx.execute(
            r#"
            INSERT INTO material (name, description, unit_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
            params![fields.name, fields.description, fields.unit_id, now],
        )?;
        let material_id = tx.last_insert_rowid();

        for entry in initial_prices {
            tx.execute(
                r#"
                INSERT INTO material_price (material_id, price, price_date)
                VALUES (?1, ?2, ?3)
                "#,
                params![material_id, entry.price.to_string(), entry.price_date],
            )?;
        }

        tx.commit()?;
        Ok(material_id)
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Material>> {
        let conn = self.get_conn()?;
        let material = conn
            .query_row(
                r#"
                SELECT id, name, description, unit_id, created_at, updated_at
                FROM material
                WHERE id = ?1
                "#,
                params![id],
                material_from_row,
            )
            .optional()?;
        Ok(material)
    }

    pub fn exists(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let found: Option<i64> = conn
            .query_row("SELECT 1 FROM material WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// All materials in insertion order.
    pub fn list_all(&self) -> RepositoryResult<Vec<Material>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, description, unit_id, created_at, updated_at
            FROM material
            ORDER BY id
            "#,
        )?;

        let materials = stmt
            .query_map([], material_from_row)?
            .collect::<SqliteResult<Vec<Material>>>()?;

        Ok(materials)
    }

    /// Overwrite the identity fields of a material.
    pub fn update_fields(&self, id: i64, fields: &MaterialFields) -> RepositoryResult<()> {
        let now = Utc::now().to_rfc3339();
        let conn = self.get_conn()?;

        let unit_found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM unit WHERE id = ?1",
                params![fields.unit_id],
                |row| row.get(0),
            )
            .optional()?;
        if unit_found.is_none() {
            return Err(RepositoryError::not_found("Unit", fields.unit_id));
        }

        let rows = conn.execute(
            r#"
            UPDATE material
            SET name = ?1, description = ?2, unit_id = ?3, updated_at = ?4
            WHERE id = ?5
            "#,
            params![fields.name, fields.description, fields.unit_id, now, id],
        )?;

        if rows == 0 {
            return Err(RepositoryError::not_found("Material", id));
        }
        Ok(())
    }

    /// Delete a material row together with its price history, atomically.
    ///
    /// In-use protection is the usage guard's job; calling this on a
    /// material still referenced by a BOM line surfaces the foreign-key
    /// violation instead.
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            "DELETE FROM material_price WHERE material_id = ?1",
            params![id],
        )?;
        let rows = tx.execute("DELETE FROM material WHERE id = ?1", params![id])?;

        if rows == 0 {
            return Err(RepositoryError::not_found("Material", id));
        }

        tx.commit()?;
        Ok(())
    }
}

// ==========================================
// MaterialPriceRepository - price history
// ==========================================
pub struct MaterialPriceRepository {
    conn: Arc<Mutex<Connection>>,
}

fn price_from_row(row: &Row<'_>) -> rusqlite::Result<MaterialPrice> {
    Ok(MaterialPrice {
        id: row.get(0)?,
        material_id: row.get(1)?,
        price: decimal_column(2, row.get::<_, String>(2)?)?,
        price_date: row.get(3)?,
    })
}

impl MaterialPriceRepository {
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

    /// Insert one price point and return its assigned id.
    pub fn insert(
        &self,
        material_id: i64,
        price: Decimal,
        price_date: NaiveDate,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO material_price (material_id, price, price_date)
            VALUES (?1, ?2, ?3)
            "#,
            params![material_id, price.to_string(), price_date],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<MaterialPrice>> {
        let conn = self.get_conn()?;
        let price = conn
            .query_row(
                r#"
                SELECT id, material_id, price, price_date
                FROM material_price
                WHERE id = ?1
                "#,
                params![id],
                price_from_row,
            )
            .optional()?;
        Ok(price)
    }

    /// Full price history of a material, most recent date first; among equal
    /// dates the most recently added row wins.
    pub fn history(&self, material_id: i64) -> RepositoryResult<Vec<MaterialPrice>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, material_id, price, price_date
            FROM material_price
            WHERE material_id = ?1
            ORDER BY price_date DESC, id DESC
            "#,
        )?;

        let prices = stmt
            .query_map(params![material_id], price_from_row)?
            .collect::<SqliteResult<Vec<MaterialPrice>>>()?;

        Ok(prices)
    }

    /// Apply a reconciliation diff in one transaction.
    ///
    /// Updates and deletes are scoped to the given material so a stray id
    /// from another material's history cannot be touched.
    pub fn apply_diff(&self, material_id: i64, diff: &PriceListDiff) -> RepositoryResult<()> {
        if diff.is_empty() {
            return Ok(());
        }

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        for entry in &diff.to_add {
            tx.execute(
                r#"
                INSERT INTO material_price (material_id, price, price_date)
                VALUES (?1, ?2, ?3)
                "#,
                params![material_id, entry.price.to_string(), entry.price_date],
            )?;
        }

        for updated in &diff.to_update {
            let rows = tx.execute(
                r#"
                UPDATE material_price
                SET price = ?1, price_date = ?2
                WHERE id = ?3 AND material_id = ?4
                "#,
                params![
                    updated.price.to_string(),
                    updated.price_date,
                    updated.id,
                    material_id
                ],
            )?;
            if rows == 0 {
                return Err(RepositoryError::not_found("MaterialPrice", updated.id));
            }
        }

        for price_id in &diff.to_delete {
            tx.execute(
                "DELETE FROM material_price WHERE id = ?1 AND material_id = ?2",
                params![price_id, material_id],
            )?;
        }

        tx.commit()?;
        Ok(())
    }
}
