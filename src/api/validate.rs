// ==========================================
// BOM Costing Engine - input validation
// ==========================================
// Small checks every mutating API runs before touching the store. A failed
// check is a ValidationError and nothing has been written.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use rust_decimal::Decimal;

/// Required text field must contain something besides whitespace.
pub fn non_blank(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

/// Monetary values (prices, expense values, markup) must be >= 0.
pub fn non_negative(field: &str, value: Decimal) -> ApiResult<()> {
    if value.is_sign_negative() {
        return Err(ApiError::ValidationError(format!(
            "{} must not be negative (got {})",
            field, value
        )));
    }
    Ok(())
}

/// Quantities must be strictly positive.
pub fn positive(field: &str, value: Decimal) -> ApiResult<()> {
    if value <= Decimal::ZERO {
        return Err(ApiError::ValidationError(format!(
            "{} must be greater than zero (got {})",
            field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_non_blank() {
        assert!(non_blank("name", "kg").is_ok());
        assert!(non_blank("name", "   ").is_err());
        assert!(non_blank("name", "").is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(non_negative("price", Decimal::ZERO).is_ok());
        assert!(non_negative("price", dec("10.50")).is_ok());
        assert!(non_negative("price", dec("-0.01")).is_err());
    }

    #[test]
    fn test_positive() {
        assert!(positive("quantity", dec("0.001")).is_ok());
        assert!(positive("quantity", Decimal::ZERO).is_err());
        assert!(positive("quantity", dec("-2")).is_err());
    }
}
