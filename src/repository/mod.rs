// ==========================================
// BOM Costing Engine - repository layer
// ==========================================
// Responsibilities: data access only; no business rules live here.
// Constraints: every query is parameterized.
// ==========================================

pub mod error;
pub mod expense_type_repo;
pub mod material_repo;
pub mod product_repo;
pub mod unit_repo;

// Core re-exports
pub use error::{RepositoryError, RepositoryResult};
pub use expense_type_repo::ExpenseTypeRepository;
pub use material_repo::{MaterialPriceRepository, MaterialRepository};
pub use product_repo::ProductRepository;
pub use unit_repo::UnitRepository;

use rust_decimal::Decimal;

/// Parse a decimal column stored as TEXT.
///
/// Maps a corrupt cell onto the rusqlite conversion error so row mappers can
/// use `?` directly.
pub(crate) fn decimal_column(idx: usize, raw: String) -> rusqlite::Result<Decimal> {
    raw.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse an RFC 3339 timestamp column stored as TEXT.
pub(crate) fn datetime_column(
    idx: usize,
    raw: String,
) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    raw.parse::<chrono::DateTime<chrono::Utc>>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
