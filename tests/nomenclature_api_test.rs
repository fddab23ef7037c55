// ==========================================
// NomenclatureApi integration tests
// ==========================================
// Units of measure and expense categories: creation, listing, search.
// ==========================================

mod helpers;

use bom_costing::api::ApiError;
use helpers::api_test_helper::ApiTestEnv;

#[test]
fn test_units_are_listed_in_insertion_order() {
    let env = ApiTestEnv::new().expect("test env");

    env.nomenclature_api.create_unit("kg").unwrap();
    env.nomenclature_api.create_unit("l").unwrap();
    env.nomenclature_api.create_unit("pc").unwrap();

    let units = env.nomenclature_api.list_units().unwrap();
    let names: Vec<&str> = units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["kg", "l", "pc"]);
}

#[test]
fn test_create_unit_trims_and_validates_name() {
    let env = ApiTestEnv::new().expect("test env");

    let id = env.nomenclature_api.create_unit("  kg  ").unwrap();
    let units = env.nomenclature_api.list_units().unwrap();
    assert_eq!(units[0].id, id);
    assert_eq!(units[0].name, "kg");

    let err = env.nomenclature_api.create_unit("   ").unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
}

#[test]
fn test_expense_type_search_matches_id_and_name() {
    let env = ApiTestEnv::new().expect("test env");

    let labor = env.nomenclature_api.create_expense_type("Labor").unwrap();
    env.nomenclature_api.create_expense_type("Electricity").unwrap();
    env.nomenclature_api.create_expense_type("Packaging").unwrap();

    let by_name = env
        .nomenclature_api
        .list_expense_types(Some("ELECTR"))
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Electricity");

    let by_id = env
        .nomenclature_api
        .list_expense_types(Some(&labor.to_string()))
        .unwrap();
    assert!(by_id.iter().any(|t| t.id == labor));

    let all = env.nomenclature_api.list_expense_types(None).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn test_create_expense_type_validates_name() {
    let env = ApiTestEnv::new().expect("test env");

    let err = env.nomenclature_api.create_expense_type("").unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
    assert!(env
        .nomenclature_api
        .list_expense_types(None)
        .unwrap()
        .is_empty());
}
