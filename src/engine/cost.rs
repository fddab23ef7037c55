// ==========================================
// BOM Costing Engine - cost calculator
// ==========================================
// Aggregates resolved material costs and flat expenses into total cost and
// sale price. Markup policy: flat addition - the operator's markup is an
// absolute amount added to total cost. All arithmetic is exact; rounding
// happens only in `presentation`.
// ==========================================

use crate::domain::CostBreakdown;
use rust_decimal::{Decimal, RoundingStrategy};

/// One BOM line as seen by the calculator: quantity plus the resolved unit
/// price. A line without a resolvable price contributes zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostedLine {
    pub quantity: Decimal,
    pub unit_price: Option<Decimal>,
}

pub struct CostCalculator;

impl CostCalculator {
    /// Compute material cost, total cost and sale price.
    ///
    /// - material_cost = sum(unit_price x quantity) over the lines
    /// - total_cost   = material_cost + sum(expense values)
    /// - sale_price   = total_cost + markup
    pub fn compute(
        lines: &[CostedLine],
        expense_values: &[Decimal],
        markup: Decimal,
    ) -> CostBreakdown {
        let material_cost: Decimal = lines
            .iter()
            .map(|line| line.unit_price.unwrap_or_default() * line.quantity)
            .sum();

        let other_expenses: Decimal = expense_values.iter().copied().sum();

        let total_cost = material_cost + other_expenses;
        let sale_price = total_cost + markup;

        CostBreakdown {
            material_cost,
            total_cost,
            sale_price,
        }
    }

    /// Round a monetary value to two decimal places for display.
    ///
    /// Never feed the result back into a computation; repeated recalculation
    /// while the operator adjusts the markup must stay exact.
    pub fn presentation(value: Decimal) -> Decimal {
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_material_cost_plus_expenses_plus_markup() {
        // 12.00 x 2 material, one 5.00 expense, 10 markup
        let lines = vec![CostedLine {
            quantity: dec("2"),
            unit_price: Some(dec("12.00")),
        }];
        let expenses = vec![dec("5.00")];

        let breakdown = CostCalculator::compute(&lines, &expenses, dec("10"));

        assert_eq!(breakdown.material_cost, dec("24.00"));
        assert_eq!(breakdown.total_cost, dec("29.00"));
        assert_eq!(breakdown.sale_price, dec("39.00"));
    }

    #[test]
    fn test_line_without_price_contributes_zero() {
        let lines = vec![
            CostedLine {
                quantity: dec("3"),
                unit_price: None,
            },
            CostedLine {
                quantity: dec("1.5"),
                unit_price: Some(dec("4.20")),
            },
        ];

        let breakdown = CostCalculator::compute(&lines, &[], Decimal::ZERO);

        assert_eq!(breakdown.material_cost, dec("6.30"));
        assert_eq!(breakdown.total_cost, dec("6.30"));
        assert_eq!(breakdown.sale_price, dec("6.30"));
    }

    #[test]
    fn test_empty_inputs_cost_nothing() {
        let breakdown = CostCalculator::compute(&[], &[], Decimal::ZERO);
        assert_eq!(breakdown.total_cost, Decimal::ZERO);
        assert_eq!(breakdown.sale_price, Decimal::ZERO);
    }

    #[test]
    fn test_exact_arithmetic_survives_repeated_recalculation() {
        // 0.1 x 3 would drift under binary floats; decimals stay exact no
        // matter how often the markup is adjusted.
        let lines = vec![CostedLine {
            quantity: dec("3"),
            unit_price: Some(dec("0.1")),
        }];

        let mut breakdown = CostCalculator::compute(&lines, &[], Decimal::ZERO);
        for _ in 0..100 {
            breakdown = CostCalculator::compute(&lines, &[], Decimal::ZERO);
        }

        assert_eq!(breakdown.total_cost, dec("0.3"));
    }

    #[test]
    fn test_presentation_rounding() {
        assert_eq!(CostCalculator::presentation(dec("1.005")), dec("1.01"));
        assert_eq!(CostCalculator::presentation(dec("29")), dec("29.00"));
        assert_eq!(CostCalculator::presentation(dec("3.14159")), dec("3.14"));
    }
}
