// ==========================================
// BOM Costing Engine - price resolver
// ==========================================
// Selects the applicable price from a material's price history. Selection is
// always exactly one stored price point (or none at all); nothing is
// interpolated or averaged.
// ==========================================

use crate::domain::MaterialPrice;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::MaterialPriceRepository;
use std::sync::Arc;

pub struct PriceResolver {
    price_repo: Arc<MaterialPriceRepository>,
}

impl PriceResolver {
    pub fn new(price_repo: Arc<MaterialPriceRepository>) -> Self {
        Self { price_repo }
    }

    /// Full price history, most recent date first; among equal dates the
    /// most recently added row wins.
    pub fn history(&self, material_id: i64) -> RepositoryResult<Vec<MaterialPrice>> {
        self.price_repo.history(material_id)
    }

    /// Default selection: the first element of the history ordering, i.e.
    /// the most recent price. `None` for a material with no price history.
    pub fn default_price(&self, material_id: i64) -> RepositoryResult<Option<MaterialPrice>> {
        Ok(self.history(material_id)?.into_iter().next())
    }

    /// Resolve the price for a BOM line.
    ///
    /// An explicit selection must name a price row belonging to the
    /// material, otherwise `NotFound`; without a selection the default
    /// applies.
    pub fn resolve(
        &self,
        material_id: i64,
        selected_price_id: Option<i64>,
    ) -> RepositoryResult<Option<MaterialPrice>> {
        match selected_price_id {
            Some(price_id) => {
                let price = self
                    .price_repo
                    .find_by_id(price_id)?
                    .filter(|p| p.material_id == material_id)
                    .ok_or_else(|| RepositoryError::not_found("MaterialPrice", price_id))?;
                Ok(Some(price))
            }
            None => self.default_price(material_id),
        }
    }
}
