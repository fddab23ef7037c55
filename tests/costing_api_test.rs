// ==========================================
// CostingApi integration tests
// ==========================================
// Coverage: price selection determinism, cost aggregation under the
// flat-addition markup policy, and selection pinning.
// ==========================================

mod helpers;

use bom_costing::api::{ApiError, CostLineInput};
use bom_costing::domain::MaterialPrice;
use bom_costing::engine::CostCalculator;
use helpers::api_test_helper::ApiTestEnv;
use helpers::test_data_builder::{dec, MaterialBuilder};
use rust_decimal::Decimal;

/// Material with the canonical two-point history: 10.00 on 2024-01-01 and
/// 12.00 on 2024-06-01.
fn seed_priced_material(env: &ApiTestEnv) -> (i64, Vec<MaterialPrice>) {
    let kg = env.nomenclature_api.create_unit("kg").unwrap();
    let (fields, prices) = MaterialBuilder::new("Flour", kg)
        .price("10.00", "2024-01-01")
        .price("12.00", "2024-06-01")
        .build();
    let material = env.material_api.create_material(fields, prices).unwrap();
    let history = env.material_api.material_details(material).unwrap().prices;
    (material, history)
}

#[test]
fn test_default_selection_uses_most_recent_price() {
    let env = ApiTestEnv::new().expect("test env");
    let (material, _history) = seed_priced_material(&env);

    let breakdown = env
        .costing_api
        .compute_cost(
            &[CostLineInput {
                material_id: material,
                quantity: dec("2"),
                selected_price_id: None,
            }],
            &[],
            Decimal::ZERO,
        )
        .unwrap();

    assert_eq!(breakdown.material_cost, dec("24.00"));
}

#[test]
fn test_pinned_selection_overrides_default() {
    let env = ApiTestEnv::new().expect("test env");
    let (material, history) = seed_priced_material(&env);

    // history is most-recent-first; pin the older 10.00 row
    let older = history.last().unwrap();
    assert_eq!(older.price, dec("10.00"));

    let breakdown = env
        .costing_api
        .compute_cost(
            &[CostLineInput {
                material_id: material,
                quantity: dec("2"),
                selected_price_id: Some(older.id),
            }],
            &[],
            Decimal::ZERO,
        )
        .unwrap();

    assert_eq!(breakdown.material_cost, dec("20.00"));
}

#[test]
fn test_total_cost_and_flat_markup() {
    let env = ApiTestEnv::new().expect("test env");
    let (material, _history) = seed_priced_material(&env);

    let breakdown = env
        .costing_api
        .compute_cost(
            &[CostLineInput {
                material_id: material,
                quantity: dec("2"),
                selected_price_id: None,
            }],
            &[dec("5.00")],
            dec("10"),
        )
        .unwrap();

    assert_eq!(breakdown.material_cost, dec("24.00"));
    assert_eq!(breakdown.total_cost, dec("29.00"));
    assert_eq!(breakdown.sale_price, dec("39.00"));
    assert_eq!(
        CostCalculator::presentation(breakdown.sale_price),
        dec("39.00")
    );
}

#[test]
fn test_material_without_history_contributes_zero() {
    let env = ApiTestEnv::new().expect("test env");
    let kg = env.nomenclature_api.create_unit("kg").unwrap();
    let (fields, prices) = MaterialBuilder::new("Water", kg).build();
    let material = env.material_api.create_material(fields, prices).unwrap();

    let breakdown = env
        .costing_api
        .compute_cost(
            &[CostLineInput {
                material_id: material,
                quantity: dec("3"),
                selected_price_id: None,
            }],
            &[dec("1.00")],
            Decimal::ZERO,
        )
        .unwrap();

    assert_eq!(breakdown.material_cost, Decimal::ZERO);
    assert_eq!(breakdown.total_cost, dec("1.00"));
}

#[test]
fn test_pinned_price_of_another_material_is_rejected() {
    let env = ApiTestEnv::new().expect("test env");
    let (material, _history) = seed_priced_material(&env);

    let kg = env.nomenclature_api.create_unit("kg").unwrap();
    let (fields, prices) = MaterialBuilder::new("Sugar", kg)
        .price("2.00", "2024-03-01")
        .build();
    let sugar = env.material_api.create_material(fields, prices).unwrap();
    let sugar_price = &env.material_api.material_details(sugar).unwrap().prices[0];

    let err = env
        .costing_api
        .compute_cost(
            &[CostLineInput {
                material_id: material,
                quantity: dec("1"),
                selected_price_id: Some(sugar_price.id),
            }],
            &[],
            Decimal::ZERO,
        )
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn test_deleted_pinned_price_surfaces_as_not_found() {
    let env = ApiTestEnv::new().expect("test env");
    let (material, history) = seed_priced_material(&env);

    // Reconcile the older row away, then cost with the stale pin
    let keep = &history[0];
    let unit_id = env
        .material_api
        .material_details(material)
        .unwrap()
        .material
        .unit_id;
    env.material_api
        .update_material(
            material,
            bom_costing::domain::MaterialFields {
                name: "Flour".to_string(),
                description: None,
                unit_id,
            },
            vec![bom_costing::domain::PriceEntry::from(keep)],
        )
        .unwrap();

    let stale = history.last().unwrap();
    let err = env
        .costing_api
        .compute_cost(
            &[CostLineInput {
                material_id: material,
                quantity: dec("1"),
                selected_price_id: Some(stale.id),
            }],
            &[],
            Decimal::ZERO,
        )
        .unwrap_err();

    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn test_rejects_invalid_inputs() {
    let env = ApiTestEnv::new().expect("test env");
    let (material, _history) = seed_priced_material(&env);

    let zero_qty = env.costing_api.compute_cost(
        &[CostLineInput {
            material_id: material,
            quantity: Decimal::ZERO,
            selected_price_id: None,
        }],
        &[],
        Decimal::ZERO,
    );
    assert!(matches!(zero_qty, Err(ApiError::ValidationError(_))));

    let negative_markup = env.costing_api.compute_cost(&[], &[], dec("-1"));
    assert!(matches!(negative_markup, Err(ApiError::ValidationError(_))));

    let negative_expense = env.costing_api.compute_cost(&[], &[dec("-0.01")], Decimal::ZERO);
    assert!(matches!(negative_expense, Err(ApiError::ValidationError(_))));
}
