// ==========================================
// BOM Costing Engine - list filtering
// ==========================================
// Case-insensitive substring match across the stringified id, the name and
// (where present) the description. No ranking: result order equals scan
// order, filtered in place.
// ==========================================

use crate::domain::{ExpenseType, Material, Product};

/// A record the list filter can look into.
pub trait Searchable {
    fn record_id(&self) -> i64;
    fn record_name(&self) -> &str;
    fn record_description(&self) -> Option<&str> {
        None
    }
}

impl Searchable for Material {
    fn record_id(&self) -> i64 {
        self.id
    }
    fn record_name(&self) -> &str {
        &self.name
    }
    fn record_description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Searchable for Product {
    fn record_id(&self) -> i64 {
        self.id
    }
    fn record_name(&self) -> &str {
        &self.name
    }
    fn record_description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Searchable for ExpenseType {
    fn record_id(&self) -> i64 {
        self.id
    }
    fn record_name(&self) -> &str {
        &self.name
    }
}

/// Filter records by a search term.
///
/// An empty or whitespace-only term returns the input unchanged.
pub fn filter_records<T: Searchable>(records: Vec<T>, term: &str) -> Vec<T> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| record_matches(record, &needle))
        .collect()
}

fn record_matches<T: Searchable>(record: &T, needle: &str) -> bool {
    record.record_id().to_string().contains(needle)
        || record.record_name().to_lowercase().contains(needle)
        || record
            .record_description()
            .map_or(false, |d| d.to_lowercase().contains(needle))
}
