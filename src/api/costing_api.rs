// ==========================================
// BOM Costing Engine - costing API
// ==========================================
// Computes material cost, total cost and sale price for a set of BOM lines
// under the flat-addition markup policy. Pinned price ids are re-resolved
// against the store on every call, so a stale selection surfaces instead of
// silently costing wrong.
// ==========================================

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;
use crate::api::validate;
use crate::domain::CostBreakdown;
use crate::engine::cost::{CostCalculator, CostedLine};
use crate::engine::price_resolver::PriceResolver;

/// One BOM line as submitted for costing. `selected_price_id: None` means
/// "use the most recent price"; an explicit id pins the line to that price
/// point and must belong to the line's material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLineInput {
    pub material_id: i64,
    pub quantity: Decimal,
    pub selected_price_id: Option<i64>,
}

pub struct CostingApi {
    resolver: Arc<PriceResolver>,
}

impl CostingApi {
    pub fn new(resolver: Arc<PriceResolver>) -> Self {
        Self { resolver }
    }

    /// Compute the cost breakdown for a set of BOM lines and flat expenses.
    ///
    /// A line whose material has no price history contributes zero to the
    /// material cost. Results are exact decimals; round only for display
    /// (`CostCalculator::presentation`).
    pub fn compute_cost(
        &self,
        lines: &[CostLineInput],
        expense_values: &[Decimal],
        markup: Decimal,
    ) -> ApiResult<CostBreakdown> {
        for line in lines {
            validate::positive("quantity", line.quantity)?;
        }
        for value in expense_values {
            validate::non_negative("expense value", *value)?;
        }
        validate::non_negative("markup", markup)?;

        let mut costed = Vec::with_capacity(lines.len());
        for line in lines {
            let price = self
                .resolver
                .resolve(line.material_id, line.selected_price_id)?;
            costed.push(CostedLine {
                quantity: line.quantity,
                unit_price: price.map(|p| p.price),
            });
        }

        Ok(CostCalculator::compute(&costed, expense_values, markup))
    }
}
