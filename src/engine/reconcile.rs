// ==========================================
// BOM Costing Engine - price-list reconciliation
// ==========================================
// Three-way diff between the stored price history of a material and the
// list an operator submits when saving an edit. This is reconciliation, not
// an overwrite: unmodified rows keep their ids.
// ==========================================

use crate::domain::{MaterialPrice, PriceEntry, PriceListDiff};

/// Diff a submitted price list against the stored history.
///
/// Rules:
/// - submitted entries without an id are new and go to `to_add`;
/// - stored rows absent from the submission go to `to_delete`;
/// - rows present in both whose price or date differs go to `to_update`,
///   keeping their id;
/// - rows present in both and unchanged are untouched;
/// - submitted entries carrying an id the store does not know are ignored.
///
/// Pure function; applying the result is the price repository's job.
pub fn diff_price_lists(existing: &[MaterialPrice], submitted: &[PriceEntry]) -> PriceListDiff {
    let mut diff = PriceListDiff::default();

    for entry in submitted {
        match entry.id {
            None => diff.to_add.push(entry.clone()),
            Some(id) => {
                if let Some(stored) = existing.iter().find(|p| p.id == id) {
                    if stored.price != entry.price || stored.price_date != entry.price_date {
                        diff.to_update.push(MaterialPrice {
                            id,
                            material_id: stored.material_id,
                            price: entry.price,
                            price_date: entry.price_date,
                        });
                    }
                }
            }
        }
    }

    for stored in existing {
        let still_submitted = submitted.iter().any(|e| e.id == Some(stored.id));
        if !still_submitted {
            diff.to_delete.push(stored.id);
        }
    }

    diff
}
