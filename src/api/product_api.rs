// ==========================================
// BOM Costing Engine - product API
// ==========================================
// Responsibilities:
// 1. Product listing and search
// 2. Atomic creation of a product with its BOM and expense snapshot
// 3. Details view with the default price preselected per BOM line
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validate;
use crate::domain::{
    BomLine, BomLineDraft, ExpenseLineDraft, MaterialPrice, Product, ProductExpense, ProductFields,
};
use crate::engine::price_resolver::PriceResolver;
use crate::engine::search::filter_records;
use crate::repository::{ExpenseTypeRepository, MaterialRepository, ProductRepository};

// ==========================================
// ProductDetails - product + costing inputs view
// ==========================================
/// Product view handed to the cost review: every BOM line carries the full
/// price history of its material with the most recent price preselected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetails {
    pub product: Product,
    pub bom: Vec<BomLineDetail>,
    pub expenses: Vec<ExpenseDetail>,
}

/// One BOM line with its resolved price context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomLineDetail {
    pub line: BomLine,
    pub material_name: String,
    /// Most recent date first; among equal dates the most recently added
    /// row wins.
    pub price_history: Vec<MaterialPrice>,
    /// Defaults to the first history element; the caller may repoint it at
    /// any other price id of the same material.
    pub selected_price_id: Option<i64>,
}

/// One expense line with its category name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDetail {
    pub expense: ProductExpense,
    pub expense_type_name: String,
}

// ==========================================
// ProductApi
// ==========================================
pub struct ProductApi {
    product_repo: Arc<ProductRepository>,
    material_repo: Arc<MaterialRepository>,
    expense_type_repo: Arc<ExpenseTypeRepository>,
    resolver: Arc<PriceResolver>,
}

impl ProductApi {
    pub fn new(
        product_repo: Arc<ProductRepository>,
        material_repo: Arc<MaterialRepository>,
        expense_type_repo: Arc<ExpenseTypeRepository>,
        resolver: Arc<PriceResolver>,
    ) -> Self {
        Self {
            product_repo,
            material_repo,
            expense_type_repo,
            resolver,
        }
    }

    // ==========================================
    // Queries
    // ==========================================

    /// List products, optionally filtered by a search term matched against
    /// id, name and description.
    pub fn list_products(&self, filter_term: Option<&str>) -> ApiResult<Vec<Product>> {
        let products = self.product_repo.list_all()?;
        Ok(match filter_term {
            Some(term) => filter_records(products, term),
            None => products,
        })
    }

    /// Product details with the default price resolved for every BOM line.
    pub fn get_product_details(&self, product_id: i64) -> ApiResult<ProductDetails> {
        let product = self
            .product_repo
            .find_by_id(product_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Product (id={})", product_id)))?;

        let lines = self.product_repo.bom_lines(product_id)?;
        let mut bom = Vec::with_capacity(lines.len());
        for line in lines {
            let material_name = self
                .material_repo
                .find_by_id(line.material_id)?
                .map(|m| m.name)
                .unwrap_or_else(|| "Unknown".to_string());

            let price_history = self.resolver.history(line.material_id)?;
            let selected_price_id = price_history.first().map(|p| p.id);

            bom.push(BomLineDetail {
                line,
                material_name,
                price_history,
                selected_price_id,
            });
        }

        let expense_rows = self.product_repo.expenses(product_id)?;
        let mut expenses = Vec::with_capacity(expense_rows.len());
        for expense in expense_rows {
            let expense_type_name = self
                .expense_type_repo
                .find_by_id(expense.expense_type_id)?
                .map(|t| t.name)
                .unwrap_or_else(|| "Unknown".to_string());
            expenses.push(ExpenseDetail {
                expense,
                expense_type_name,
            });
        }

        Ok(ProductDetails {
            product,
            bom,
            expenses,
        })
    }

    // ==========================================
    // Mutations
    // ==========================================

    /// Create a product together with its BOM lines and expense lines.
    ///
    /// The whole creation is one transaction: if any referenced material or
    /// expense type is missing, nothing of the product is stored.
    pub fn create_product(
        &self,
        fields: ProductFields,
        bom_lines: Vec<BomLineDraft>,
        expense_lines: Vec<ExpenseLineDraft>,
    ) -> ApiResult<i64> {
        validate::non_blank("product name", &fields.name)?;
        for line in &bom_lines {
            validate::positive("quantity", line.quantity)?;
        }
        for expense in &expense_lines {
            validate::non_negative("expense value", expense.value)?;
        }

        let id = self
            .product_repo
            .create_with_lines(&fields, &bom_lines, &expense_lines)?;

        debug!(
            product_id = id,
            bom_lines = bom_lines.len(),
            expense_lines = expense_lines.len(),
            "product created"
        );
        Ok(id)
    }

    /// Delete a product; its BOM lines and expense lines go with it.
    pub fn delete_product(&self, product_id: i64) -> ApiResult<()> {
        self.product_repo.delete(product_id)?;
        Ok(())
    }
}
