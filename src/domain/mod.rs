// ==========================================
// BOM Costing Engine - domain layer
// ==========================================
// Entities and request types only; no data access, no engine logic.
// ==========================================

pub mod catalog;
pub mod costing;
pub mod material;
pub mod product;

// Core re-exports
pub use catalog::{ExpenseType, Unit};
pub use costing::CostBreakdown;
pub use material::{Material, MaterialFields, MaterialPrice, PriceEntry, PriceListDiff};
pub use product::{
    BomLine, BomLineDraft, ExpenseLineDraft, Product, ProductExpense, ProductFields,
};
