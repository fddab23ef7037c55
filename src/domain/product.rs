// ==========================================
// BOM Costing Engine - product domain model
// ==========================================
// A product is created once with its full bill of materials and expense
// snapshot. Deleting a product removes its lines and expenses with it.
// ==========================================

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// Product - master row
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// BomLine - product/material link
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    pub id: i64,
    pub product_id: i64,  // FK -> product
    pub material_id: i64, // FK -> material
    pub quantity: Decimal, // > 0
}

// ==========================================
// ProductExpense - product/expense-type link
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductExpense {
    pub id: i64,
    pub product_id: i64,      // FK -> product
    pub expense_type_id: i64, // FK -> expense_type
    pub value: Decimal,       // >= 0, flat cost
}

// ==========================================
// Request types
// ==========================================

/// Fields of a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub description: Option<String>,
}

/// One BOM line of a product being created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLineDraft {
    pub material_id: i64,
    pub quantity: Decimal,
}

/// One expense line of a product being created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseLineDraft {
    pub expense_type_id: i64,
    pub value: Decimal,
}
