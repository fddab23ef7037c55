// ==========================================
// BOM Costing Engine - material API
// ==========================================
// Responsibilities:
// 1. Material listing and search
// 2. Create/edit/delete with usage-gated mutability
// 3. Price-history reconciliation on edit
// ==========================================

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validate;
use crate::domain::{Material, MaterialFields, MaterialPrice, PriceEntry, Product};
use crate::engine::reconcile::diff_price_lists;
use crate::engine::search::filter_records;
use crate::engine::usage_guard::UsageGuard;
use crate::repository::{
    MaterialPriceRepository, MaterialRepository, ProductRepository, UnitRepository,
};

// ==========================================
// MaterialDetails - material + usage view
// ==========================================
/// Full material view: unit name, price history, and the products whose
/// BOMs consume the material with their summed quantities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDetails {
    pub material: Material,
    pub unit_name: String,
    pub prices: Vec<MaterialPrice>,
    pub used_by: Vec<ProductUsage>,
}

/// One product consuming a material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUsage {
    pub product: Product,
    pub total_quantity: Decimal,
}

// ==========================================
// MaterialApi
// ==========================================
pub struct MaterialApi {
    material_repo: Arc<MaterialRepository>,
    price_repo: Arc<MaterialPriceRepository>,
    product_repo: Arc<ProductRepository>,
    unit_repo: Arc<UnitRepository>,
    guard: Arc<UsageGuard>,
}

impl MaterialApi {
    pub fn new(
        material_repo: Arc<MaterialRepository>,
        price_repo: Arc<MaterialPriceRepository>,
        product_repo: Arc<ProductRepository>,
        unit_repo: Arc<UnitRepository>,
        guard: Arc<UsageGuard>,
    ) -> Self {
        Self {
            material_repo,
            price_repo,
            product_repo,
            unit_repo,
            guard,
        }
    }

    // ==========================================
    // Queries
    // ==========================================

    /// List materials, optionally filtered by a search term matched against
    /// id, name and description.
    pub fn list_materials(&self, filter_term: Option<&str>) -> ApiResult<Vec<Material>> {
        let materials = self.material_repo.list_all()?;
        Ok(match filter_term {
            Some(term) => filter_records(materials, term),
            None => materials,
        })
    }

    /// True iff at least one BOM line references the material. Evaluated
    /// fresh; see the usage guard.
    pub fn is_material_in_use(&self, material_id: i64) -> ApiResult<bool> {
        Ok(self.guard.is_material_in_use(material_id)?)
    }

    /// Material details: unit name, full price history (most recent first)
    /// and the products using the material.
    pub fn material_details(&self, material_id: i64) -> ApiResult<MaterialDetails> {
        let material = self
            .material_repo
            .find_by_id(material_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Material (id={})", material_id)))?;

        let unit_name = self
            .unit_repo
            .find_by_id(material.unit_id)?
            .map(|u| u.name)
            .unwrap_or_else(|| "N/A".to_string());

        let prices = self.price_repo.history(material_id)?;

        // Group the referencing BOM lines per product, keeping first-seen
        // order, and sum the quantities.
        let lines = self.product_repo.bom_lines_for_material(material_id)?;
        let mut usage: Vec<(i64, Decimal)> = Vec::new();
        for line in &lines {
            match usage.iter_mut().find(|(pid, _)| *pid == line.product_id) {
                Some((_, total)) => *total += line.quantity,
                None => usage.push((line.product_id, line.quantity)),
            }
        }

        let mut used_by = Vec::with_capacity(usage.len());
        for (product_id, total_quantity) in usage {
            if let Some(product) = self.product_repo.find_by_id(product_id)? {
                used_by.push(ProductUsage {
                    product,
                    total_quantity,
                });
            }
        }

        Ok(MaterialDetails {
            material,
            unit_name,
            prices,
            used_by,
        })
    }

    // ==========================================
    // Mutations
    // ==========================================

    /// Create a material with its initial price list.
    pub fn create_material(
        &self,
        fields: MaterialFields,
        initial_prices: Vec<PriceEntry>,
    ) -> ApiResult<i64> {
        validate::non_blank("material name", &fields.name)?;
        for entry in &initial_prices {
            validate::non_negative("price", entry.price)?;
        }

        let id = self
            .material_repo
            .create_with_prices(&fields, &initial_prices)?;

        debug!(material_id = id, prices = initial_prices.len(), "material created");
        Ok(id)
    }

    /// Save a material edit: identity fields plus the submitted price list.
    ///
    /// When the material is in use, changes to the identity fields are
    /// silently dropped (logged at warn); the price list is reconciled
    /// against the stored history either way, preserving the ids of
    /// unmodified rows.
    pub fn update_material(
        &self,
        material_id: i64,
        fields: MaterialFields,
        price_list: Vec<PriceEntry>,
    ) -> ApiResult<()> {
        if self.material_repo.find_by_id(material_id)?.is_none() {
            return Err(ApiError::NotFound(format!("Material (id={})", material_id)));
        }

        validate::non_blank("material name", &fields.name)?;
        for entry in &price_list {
            validate::non_negative("price", entry.price)?;
        }

        // Usage is checked now, not when the record was loaded for editing.
        if let Some(admissible) = self.guard.admissible_fields(material_id, fields)? {
            self.material_repo.update_fields(material_id, &admissible)?;
        }

        let existing = self.price_repo.history(material_id)?;
        let diff = diff_price_lists(&existing, &price_list);
        debug!(
            material_id,
            added = diff.to_add.len(),
            updated = diff.to_update.len(),
            deleted = diff.to_delete.len(),
            "price history reconciled"
        );
        self.price_repo.apply_diff(material_id, &diff)?;

        Ok(())
    }

    /// Delete a material that no BOM line references.
    pub fn delete_material(&self, material_id: i64) -> ApiResult<()> {
        if self.material_repo.find_by_id(material_id)?.is_none() {
            return Err(ApiError::NotFound(format!("Material (id={})", material_id)));
        }

        if self.guard.is_material_in_use(material_id)? {
            warn!(material_id, "refusing to delete material in use");
            return Err(ApiError::ConstraintViolation(format!(
                "material {} is used by a bill of materials and cannot be deleted",
                material_id
            )));
        }

        self.material_repo.delete(material_id)?;
        Ok(())
    }
}
