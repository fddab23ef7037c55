// ==========================================
// BOM Costing Engine - nomenclature entities
// ==========================================
// Units of measure and expense categories. Created ad hoc by the operator,
// never deleted by the engine.
// ==========================================

use serde::{Deserialize, Serialize};

/// Measurement unit, e.g. "kg".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub name: String,
}

/// Expense category (nomenclature row referenced by product expenses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseType {
    pub id: i64,
    pub name: String,
}
