// ==========================================
// BOM Costing Engine - nomenclature API
// ==========================================
// Units of measure and expense categories: list and create. The engine
// never deletes nomenclature rows.
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::validate;
use crate::domain::{ExpenseType, Unit};
use crate::engine::search::filter_records;
use crate::repository::{ExpenseTypeRepository, UnitRepository};

pub struct NomenclatureApi {
    unit_repo: Arc<UnitRepository>,
    expense_type_repo: Arc<ExpenseTypeRepository>,
}

impl NomenclatureApi {
    pub fn new(unit_repo: Arc<UnitRepository>, expense_type_repo: Arc<ExpenseTypeRepository>) -> Self {
        Self {
            unit_repo,
            expense_type_repo,
        }
    }

    /// All units in insertion order.
    pub fn list_units(&self) -> ApiResult<Vec<Unit>> {
        Ok(self.unit_repo.list_all()?)
    }

    /// Create a unit of measure.
    pub fn create_unit(&self, name: &str) -> ApiResult<i64> {
        validate::non_blank("unit name", name)?;
        Ok(self.unit_repo.insert(name.trim())?)
    }

    /// List expense types, optionally filtered by a search term matched
    /// against id and name.
    pub fn list_expense_types(&self, filter_term: Option<&str>) -> ApiResult<Vec<ExpenseType>> {
        let expense_types = self.expense_type_repo.list_all()?;
        Ok(match filter_term {
            Some(term) => filter_records(expense_types, term),
            None => expense_types,
        })
    }

    /// Create an expense category.
    pub fn create_expense_type(&self, name: &str) -> ApiResult<i64> {
        validate::non_blank("expense type name", name)?;
        Ok(self.expense_type_repo.insert(name.trim())?)
    }
}
