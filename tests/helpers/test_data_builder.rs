// ==========================================
// Test data builders
// ==========================================

use chrono::NaiveDate;
use rust_decimal::Decimal;

use bom_costing::domain::{
    BomLineDraft, ExpenseLineDraft, MaterialFields, PriceEntry, ProductFields,
};

pub fn dec(s: &str) -> Decimal {
    s.parse().expect("literal decimal")
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("literal date")
}

// ==========================================
// MaterialBuilder
// ==========================================
pub struct MaterialBuilder {
    name: String,
    description: Option<String>,
    unit_id: i64,
    prices: Vec<PriceEntry>,
}

impl MaterialBuilder {
    pub fn new(name: &str, unit_id: i64) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            unit_id,
            prices: Vec::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn price(mut self, price: &str, price_date: &str) -> Self {
        self.prices.push(PriceEntry::new(dec(price), date(price_date)));
        self
    }

    pub fn build(self) -> (MaterialFields, Vec<PriceEntry>) {
        (
            MaterialFields {
                name: self.name,
                description: self.description,
                unit_id: self.unit_id,
            },
            self.prices,
        )
    }
}

// ==========================================
// ProductBuilder
// ==========================================
pub struct ProductBuilder {
    name: String,
    description: Option<String>,
    bom_lines: Vec<BomLineDraft>,
    expense_lines: Vec<ExpenseLineDraft>,
}

impl ProductBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            bom_lines: Vec::new(),
            expense_lines: Vec::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn line(mut self, material_id: i64, quantity: &str) -> Self {
        self.bom_lines.push(BomLineDraft {
            material_id,
            quantity: dec(quantity),
        });
        self
    }

    pub fn expense(mut self, expense_type_id: i64, value: &str) -> Self {
        self.expense_lines.push(ExpenseLineDraft {
            expense_type_id,
            value: dec(value),
        });
        self
    }

    pub fn build(self) -> (ProductFields, Vec<BomLineDraft>, Vec<ExpenseLineDraft>) {
        (
            ProductFields {
                name: self.name,
                description: self.description,
            },
            self.bom_lines,
            self.expense_lines,
        )
    }
}
