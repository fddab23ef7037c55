// ==========================================
// BOM Costing Engine - product repository
// ==========================================
// The product aggregate: master rows, BOM lines and expense lines. A
// product is born with its full line set in one transaction and dies the
// same way.
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::{
    BomLine, BomLineDraft, ExpenseLineDraft, Product, ProductExpense, ProductFields,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{datetime_column, decimal_column};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row, Transaction};
use std::sync::{Arc, Mutex};

pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: datetime_column(3, row.get::<_, String>(3)?)?,
        updated_at: datetime_column(4, row.get::<_, String>(4)?)?,
    })
}

fn bom_line_from_row(row: &Row<'_>) -> rusqlite::Result<BomLine> {
    Ok(BomLine {
        id: row.get(0)?,
        product_id: row.get(1)?,
        material_id: row.get(2)?,
        quantity: decimal_column(3, row.get::<_, String>(3)?)?,
    })
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<ProductExpense> {
    Ok(ProductExpense {
        id: row.get(0)?,
        product_id: row.get(1)?,
        expense_type_id: row.get(2)?,
        value: decimal_column(3, row.get::<_, String>(3)?)?,
    })
}

fn row_exists(tx: &Transaction<'_>, sql: &str, id: i64) -> RepositoryResult<bool> {
    let found: Option<i64> = tx.query_row(sql, params![id], |row| row.get(0)).optional()?;
    Ok(found.is_some())
}

impl ProductRepository {
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

    /// Create a product together with its BOM lines and expense lines.
    ///
    /// One transaction covers every insert. Referenced materials and expense
    /// types are re-checked inside the transaction; any missing reference
    /// rolls the whole creation back and nothing of the product remains.
    pub fn create_with_lines(
        &self,
        fields: &ProductFields,
        bom_lines: &[BomLineDraft],
        expense_lines: &[ExpenseLineDraft],
    ) -> RepositoryResult<i64> {
        let now = Utc::now().to_rfc3339();
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT INTO product (name, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
            params![fields.name, fields.description, now],
        )?;
        let product_id = tx.last_insert_rowid();

        for line in bom_lines {
            if !row_exists(&tx, "SELECT 1 FROM material WHERE id = ?1", line.material_id)? {
                return Err(RepositoryError::not_found("Material", line.material_id));
            }
            tx.execute(
                r#"
                INSERT INTO bom_line (product_id, material_id, quantity)
                VALUES (?1, ?2, ?3)
                "#,
                params![product_id, line.material_id, line.quantity.to_string()],
            )?;
        }

        for expense in expense_lines {
            if !row_exists(
                &tx,
                "SELECT 1 FROM expense_type WHERE id = ?1",
                expense.expense_type_id,
            )? {
                return Err(RepositoryError::not_found(
                    "ExpenseType",
                    expense.expense_type_id,
                ));
            }
            tx.execute(
                r#"
                INSERT INTO product_expense (product_id, expense_type_id, value)
                VALUES (?1, ?2, ?3)
                "#,
                params![product_id, expense.expense_type_id, expense.value.to_string()],
            )?;
        }

        tx.commit()?;
        Ok(product_id)
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let product = conn
            .query_row(
                r#"
                SELECT id, name, description, created_at, updated_at
                FROM product
                WHERE id = ?1
                "#,
                params![id],
                product_from_row,
            )
            .optional()?;
        Ok(product)
    }

    /// All products in insertion order.
    pub fn list_all(&self) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM product
            ORDER BY id
            "#,
        )?;

        let products = stmt
            .query_map([], product_from_row)?
            .collect::<SqliteResult<Vec<Product>>>()?;

        Ok(products)
    }

    /// Delete a product and cascade to its BOM lines and expense lines.
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute("DELETE FROM bom_line WHERE product_id = ?1", params![id])?;
        tx.execute(
            "DELETE FROM product_expense WHERE product_id = ?1",
            params![id],
        )?;
        let rows = tx.execute("DELETE FROM product WHERE id = ?1", params![id])?;

        if rows == 0 {
            return Err(RepositoryError::not_found("Product", id));
        }

        tx.commit()?;
        Ok(())
    }

    /// BOM lines of a product in insertion order.
    pub fn bom_lines(&self, product_id: i64) -> RepositoryResult<Vec<BomLine>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, product_id, material_id, quantity
            FROM bom_line
            WHERE product_id = ?1
            ORDER BY id
            "#,
        )?;

        let lines = stmt
            .query_map(params![product_id], bom_line_from_row)?
            .collect::<SqliteResult<Vec<BomLine>>>()?;

        Ok(lines)
    }

    /// Expense lines of a product in insertion order.
    pub fn expenses(&self, product_id: i64) -> RepositoryResult<Vec<ProductExpense>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, product_id, expense_type_id, value
            FROM product_expense
            WHERE product_id = ?1
            ORDER BY id
            "#,
        )?;

        let expenses = stmt
            .query_map(params![product_id], expense_from_row)?
            .collect::<SqliteResult<Vec<ProductExpense>>>()?;

        Ok(expenses)
    }

    /// Number of BOM lines referencing a material, across all products.
    ///
    /// This is the usage check behind the in-use freeze; it is evaluated
    /// fresh on every call and never cached.
    pub fn count_bom_lines_for_material(&self, material_id: i64) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM bom_line WHERE material_id = ?1",
            params![material_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// BOM lines referencing a material, across all products.
    pub fn bom_lines_for_material(&self, material_id: i64) -> RepositoryResult<Vec<BomLine>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, product_id, material_id, quantity
            FROM bom_line
            WHERE material_id = ?1
            ORDER BY id
            "#,
        )?;

        let lines = stmt
            .query_map(params![material_id], bom_line_from_row)?
            .collect::<SqliteResult<Vec<BomLine>>>()?;

        Ok(lines)
    }
}
