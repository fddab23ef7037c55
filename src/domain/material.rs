// ==========================================
// BOM Costing Engine - material domain model
// ==========================================
// A material accumulates a price history over time. Once any BOM line
// references it, its identity fields (name, description, unit) freeze and
// only the price history remains editable.
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// Material - master row
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub unit_id: i64, // FK -> unit

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// MaterialPrice - one price point
// ==========================================
// Several rows may share a date; resolution is by ordering, not uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialPrice {
    pub id: i64,
    pub material_id: i64, // FK -> material
    pub price: Decimal,   // >= 0
    pub price_date: NaiveDate,
}

// ==========================================
// MaterialFields - identity fields of a material
// ==========================================
// The restricted half of an edit request: the usage guard decides at call
// time whether these may be applied. Price-history changes travel separately
// and are always applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialFields {
    pub name: String,
    pub description: Option<String>,
    pub unit_id: i64,
}

// ==========================================
// PriceEntry - one row of a submitted price list
// ==========================================
// `id: None` marks a row the operator just added; rows carrying an id refer
// to stored price points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub id: Option<i64>,
    pub price: Decimal,
    pub price_date: NaiveDate,
}

impl PriceEntry {
    /// Entry for a brand-new price row.
    pub fn new(price: Decimal, price_date: NaiveDate) -> Self {
        Self {
            id: None,
            price,
            price_date,
        }
    }

    /// Entry referring to a stored price row.
    pub fn existing(id: i64, price: Decimal, price_date: NaiveDate) -> Self {
        Self {
            id: Some(id),
            price,
            price_date,
        }
    }
}

impl From<&MaterialPrice> for PriceEntry {
    fn from(p: &MaterialPrice) -> Self {
        Self {
            id: Some(p.id),
            price: p.price,
            price_date: p.price_date,
        }
    }
}

// ==========================================
// PriceListDiff - reconciliation outcome
// ==========================================
// Result of diffing a submitted price list against the stored history.
// Computed by the reconciliation engine, applied by the price repository in
// one transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceListDiff {
    /// Submitted rows without an id.
    pub to_add: Vec<PriceEntry>,
    /// Stored rows whose price or date changed; ids are preserved.
    pub to_update: Vec<MaterialPrice>,
    /// Ids of stored rows absent from the submission.
    pub to_delete: Vec<i64>,
}

impl PriceListDiff {
    /// True when applying the diff would not touch the store.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}
