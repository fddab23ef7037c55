// ==========================================
// BOM Costing Engine - costing result
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Output of a cost computation.
///
/// Values are exact decimals; rounding to two places happens only when a
/// caller formats them for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Sum of selected price x quantity over the BOM lines.
    pub material_cost: Decimal,
    /// material_cost plus the flat expense values.
    pub total_cost: Decimal,
    /// total_cost plus the operator-supplied markup.
    pub sale_price: Decimal,
}
