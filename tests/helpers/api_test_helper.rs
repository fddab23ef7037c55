// ==========================================
// API integration test environment
// ==========================================
// Wires every repository, engine and API on one temp database.
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tempfile::NamedTempFile;

use bom_costing::api::{CostingApi, MaterialApi, NomenclatureApi, ProductApi};
use bom_costing::db::configure_sqlite_connection;
use bom_costing::engine::{PriceResolver, UsageGuard};
use bom_costing::repository::{
    ExpenseTypeRepository, MaterialPriceRepository, MaterialRepository, ProductRepository,
    UnitRepository,
};

use super::test_helpers;

/// Everything a test needs: the APIs plus repository handles for data
/// preparation and direct assertions.
pub struct ApiTestEnv {
    pub db_path: String,

    pub material_api: MaterialApi,
    pub product_api: ProductApi,
    pub nomenclature_api: NomenclatureApi,
    pub costing_api: CostingApi,

    // Repository layer (test data preparation)
    pub unit_repo: Arc<UnitRepository>,
    pub expense_type_repo: Arc<ExpenseTypeRepository>,
    pub material_repo: Arc<MaterialRepository>,
    pub price_repo: Arc<MaterialPriceRepository>,
    pub product_repo: Arc<ProductRepository>,

    // Keep the temp file alive for the duration of the test
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, String> {
        bom_costing::logging::init_test();

        let (temp_file, db_path) =
            test_helpers::create_test_db().map_err(|e| format!("create test db: {}", e))?;

        let conn = Connection::open(&db_path).map_err(|e| format!("open db: {}", e))?;
        configure_sqlite_connection(&conn).map_err(|e| format!("configure db: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let unit_repo = Arc::new(UnitRepository::from_connection(conn.clone()));
        let expense_type_repo = Arc::new(ExpenseTypeRepository::from_connection(conn.clone()));
        let material_repo = Arc::new(MaterialRepository::from_connection(conn.clone()));
        let price_repo = Arc::new(MaterialPriceRepository::from_connection(conn.clone()));
        let product_repo = Arc::new(ProductRepository::from_connection(conn.clone()));

        let guard = Arc::new(UsageGuard::new(product_repo.clone()));
        let resolver = Arc::new(PriceResolver::new(price_repo.clone()));

        let material_api = MaterialApi::new(
            material_repo.clone(),
            price_repo.clone(),
            product_repo.clone(),
            unit_repo.clone(),
            guard,
        );
        let product_api = ProductApi::new(
            product_repo.clone(),
            material_repo.clone(),
            expense_type_repo.clone(),
            resolver.clone(),
        );
        let nomenclature_api = NomenclatureApi::new(unit_repo.clone(), expense_type_repo.clone());
        let costing_api = CostingApi::new(resolver);

        Ok(Self {
            db_path,
            material_api,
            product_api,
            nomenclature_api,
            costing_api,
            unit_repo,
            expense_type_repo,
            material_repo,
            price_repo,
            product_repo,
            _temp_file: temp_file,
        })
    }
}
