// ==========================================
// BOM Costing Engine - core library
// ==========================================
// Tracks manufactured products, the materials consumed to build them,
// time-varying material prices, and ancillary production expenses, and
// computes product cost and sale price from that data.
//
// Stack: Rust + SQLite (embedded, single user)
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and request types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Engine layer - business rules
pub mod engine;

// Configuration layer
pub mod config;

// Database infrastructure (connection init / unified PRAGMAs / schema)
pub mod db;

// Logging
pub mod logging;

// API layer - operation set consumed by the UI shell
pub mod api;

// ==========================================
// Core re-exports
// ==========================================

// Domain entities
pub use domain::{
    BomLine, CostBreakdown, ExpenseType, Material, MaterialPrice, Product, ProductExpense, Unit,
};

// Engines
pub use engine::{CostCalculator, PriceResolver, UsageGuard};

// API
pub use api::{CostingApi, MaterialApi, NomenclatureApi, ProductApi};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "BOM Costing Engine";
