// ==========================================
// BOM Costing Engine - usage guard
// ==========================================
// Decides whether a material may be freely edited and deleted or only have
// its price history extended. A material referenced by any BOM line is "in
// use": its identity fields freeze and the row cannot be deleted.
// ==========================================

use crate::domain::MaterialFields;
use crate::repository::error::RepositoryResult;
use crate::repository::ProductRepository;
use std::sync::Arc;
use tracing::warn;

pub struct UsageGuard {
    product_repo: Arc<ProductRepository>,
}

impl UsageGuard {
    pub fn new(product_repo: Arc<ProductRepository>) -> Self {
        Self { product_repo }
    }

    /// True iff at least one BOM line references the material.
    ///
    /// Evaluated fresh on every call: usage can change between the moment a
    /// record is loaded for editing and the moment it is saved, so the
    /// answer is never cached.
    pub fn is_material_in_use(&self, material_id: i64) -> RepositoryResult<bool> {
        let count = self.product_repo.count_bom_lines_for_material(material_id)?;
        Ok(count > 0)
    }

    /// Decide which identity fields of an edit request may be applied.
    ///
    /// Returns `None` when the material is in use - the requested fields are
    /// dropped (the documented silent drop; price-history changes still
    /// apply). Returns the fields unchanged when the material is free.
    pub fn admissible_fields(
        &self,
        material_id: i64,
        requested: MaterialFields,
    ) -> RepositoryResult<Option<MaterialFields>> {
        if self.is_material_in_use(material_id)? {
            warn!(
                material_id,
                "material is in use; dropping identity-field changes"
            );
            Ok(None)
        } else {
            Ok(Some(requested))
        }
    }
}
