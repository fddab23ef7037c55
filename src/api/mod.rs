// ==========================================
// BOM Costing Engine - API layer
// ==========================================
// The operation set the UI shell consumes. Validates input, delegates to
// repositories and engines, translates repository errors into
// user-presentable API errors.
// ==========================================

pub mod costing_api;
pub mod error;
pub mod material_api;
pub mod nomenclature_api;
pub mod product_api;
pub mod validate;

// Core re-exports
pub use costing_api::{CostLineInput, CostingApi};
pub use error::{ApiError, ApiResult};
pub use material_api::{MaterialApi, MaterialDetails, ProductUsage};
pub use nomenclature_api::NomenclatureApi;
pub use product_api::{BomLineDetail, ExpenseDetail, ProductApi, ProductDetails};
