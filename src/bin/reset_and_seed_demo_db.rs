// ==========================================
// BOM Costing Engine - demo database seeder
// ==========================================
// Resets the database file (backing up any existing one), creates the
// schema and seeds a small bakery scenario through the public API, then
// prints a costing run for the seeded product.
//
// Usage: seed-demo-db [db_path]
// ==========================================

use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Local, NaiveDate};
use rust_decimal::Decimal;

use bom_costing::api::{CostLineInput, CostingApi, MaterialApi, NomenclatureApi, ProductApi};
use bom_costing::config::AppConfig;
use bom_costing::db::{init_schema, open_sqlite_connection};
use bom_costing::domain::{
    BomLineDraft, ExpenseLineDraft, MaterialFields, PriceEntry, ProductFields,
};
use bom_costing::engine::cost::CostCalculator;
use bom_costing::engine::{PriceResolver, UsageGuard};
use bom_costing::logging;
use bom_costing::repository::{
    ExpenseTypeRepository, MaterialPriceRepository, MaterialRepository, ProductRepository,
    UnitRepository,
};

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| AppConfig::from_env().database_path);

    backup_and_reset_db(&db_path)?;

    if let Some(parent) = Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;
    let conn = Arc::new(Mutex::new(conn));

    // Wire repositories, engines and APIs on the shared connection
    let unit_repo = Arc::new(UnitRepository::from_connection(conn.clone()));
    let expense_type_repo = Arc::new(ExpenseTypeRepository::from_connection(conn.clone()));
    let material_repo = Arc::new(MaterialRepository::from_connection(conn.clone()));
    let price_repo = Arc::new(MaterialPriceRepository::from_connection(conn.clone()));
    let product_repo = Arc::new(ProductRepository::from_connection(conn.clone()));

    let guard = Arc::new(UsageGuard::new(product_repo.clone()));
    let resolver = Arc::new(PriceResolver::new(price_repo.clone()));

    let nomenclature = NomenclatureApi::new(unit_repo.clone(), expense_type_repo.clone());
    let materials = MaterialApi::new(
        material_repo.clone(),
        price_repo,
        product_repo.clone(),
        unit_repo,
        guard,
    );
    let products = ProductApi::new(
        product_repo,
        material_repo,
        expense_type_repo,
        resolver.clone(),
    );
    let costing = CostingApi::new(resolver);

    seed_demo_scenario(&nomenclature, &materials, &products, &costing)?;

    eprintln!("Seeded demo database at {}", db_path);
    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<(), Box<dyn Error>> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path)?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn seed_demo_scenario(
    nomenclature: &NomenclatureApi,
    materials: &MaterialApi,
    products: &ProductApi,
    costing: &CostingApi,
) -> Result<(), Box<dyn Error>> {
    let today = Local::now().date_naive();

    let kg = nomenclature.create_unit("kg")?;
    let liter = nomenclature.create_unit("l")?;
    let piece = nomenclature.create_unit("pc")?;

    let flour = materials.create_material(
        MaterialFields {
            name: "Flour".to_string(),
            description: Some("Wheat flour, type 500".to_string()),
            unit_id: kg,
        },
        vec![
            PriceEntry::new(dec("1.20"), days_ago(today, 180)),
            PriceEntry::new(dec("1.35"), days_ago(today, 30)),
        ],
    )?;
    let oil = materials.create_material(
        MaterialFields {
            name: "Sunflower oil".to_string(),
            description: None,
            unit_id: liter,
        },
        vec![PriceEntry::new(dec("2.80"), days_ago(today, 60))],
    )?;
    let box_material = materials.create_material(
        MaterialFields {
            name: "Cardboard box".to_string(),
            description: Some("Standard size".to_string()),
            unit_id: piece,
        },
        vec![PriceEntry::new(dec("0.25"), days_ago(today, 90))],
    )?;

    let labor = nomenclature.create_expense_type("Labor")?;
    let electricity = nomenclature.create_expense_type("Electricity")?;

    let bread = products.create_product(
        ProductFields {
            name: "Bread".to_string(),
            description: Some("White loaf, 650g".to_string()),
        },
        vec![
            BomLineDraft {
                material_id: flour,
                quantity: dec("0.6"),
            },
            BomLineDraft {
                material_id: oil,
                quantity: dec("0.02"),
            },
            BomLineDraft {
                material_id: box_material,
                quantity: dec("1"),
            },
        ],
        vec![
            ExpenseLineDraft {
                expense_type_id: labor,
                value: dec("0.40"),
            },
            ExpenseLineDraft {
                expense_type_id: electricity,
                value: dec("0.15"),
            },
        ],
    )?;

    // Cost the seeded product with its default price selections
    let details = products.get_product_details(bread)?;
    let lines: Vec<CostLineInput> = details
        .bom
        .iter()
        .map(|d| CostLineInput {
            material_id: d.line.material_id,
            quantity: d.line.quantity,
            selected_price_id: d.selected_price_id,
        })
        .collect();
    let expense_values: Vec<Decimal> = details.expenses.iter().map(|e| e.expense.value).collect();

    let markup = dec("0.50");
    let breakdown = costing.compute_cost(&lines, &expense_values, markup)?;

    println!("Product: {}", details.product.name);
    println!(
        "  material cost: {}",
        CostCalculator::presentation(breakdown.material_cost)
    );
    println!(
        "  total cost:    {}",
        CostCalculator::presentation(breakdown.total_cost)
    );
    println!(
        "  sale price:    {} (markup {})",
        CostCalculator::presentation(breakdown.sale_price),
        markup
    );

    Ok(())
}

fn days_ago(today: NaiveDate, days: i64) -> NaiveDate {
    today - Duration::days(days)
}

fn dec(s: &str) -> Decimal {
    s.parse().expect("literal decimal")
}
