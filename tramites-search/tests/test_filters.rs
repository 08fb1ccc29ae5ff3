mod common;

use common::{ids, record, sample_records, two_record_catalogue};
use serde_json::json;
use std::borrow::Cow;
use tramites_search::{
    apply_advanced_filters, evaluate_condition, evaluate_filter_group, DataType, FilterCondition,
    FilterGroup, GroupOperator, Operator,
};

#[test]
fn test_free_of_charge_scenario() {
    let data = two_record_catalogue();
    let group = FilterGroup::root().with_condition(FilterCondition::new(
        "c1",
        "tiene_pago",
        Operator::Equals,
        json!(false),
    ));
    let result = apply_advanced_filters(&data, Some(&group));
    assert_eq!(result.len(), 1);
    assert_eq!(result[0]["nombre"], "Certificado de Residencia");
}

#[test]
fn test_pass_through_keeps_identity() {
    let data = sample_records();
    match apply_advanced_filters(&data, None) {
        Cow::Borrowed(slice) => assert!(std::ptr::eq(slice, data.as_slice())),
        Cow::Owned(_) => panic!("Expected the input slice back"),
    }
}

#[test]
fn test_filter_preserves_order() {
    let data = sample_records();
    let group = FilterGroup::new("root", GroupOperator::Or)
        .with_condition(FilterCondition::new("c1", "id", Operator::Equals, json!(5)))
        .with_condition(FilterCondition::new("c2", "id", Operator::Equals, json!(1)))
        .with_condition(FilterCondition::new("c3", "id", Operator::Equals, json!(3)));
    assert_eq!(ids(&apply_advanced_filters(&data, Some(&group))), vec![1, 3, 5]);
}

#[test]
fn test_nested_tree_over_catalogue() {
    // Paid services of Planeación, or anything from Hacienda costing 10000 or less
    let data = sample_records();
    let planeacion = FilterGroup::new("g1", GroupOperator::And)
        .with_condition(FilterCondition::new("c1", "dependencia", Operator::Equals, json!("Planeación")))
        .with_condition(FilterCondition::new("c2", "tiene_pago", Operator::Equals, json!(true)));
    let hacienda = FilterGroup::new("g2", GroupOperator::And)
        .with_condition(FilterCondition::new("c3", "dependencia_id", Operator::In, json!([3])))
        .with_condition(
            FilterCondition::new("c4", "valor", Operator::LessEqual, json!(10000))
                .with_data_type(DataType::Number),
        );
    let group = FilterGroup::new("root", GroupOperator::Or)
        .with_group(planeacion)
        .with_group(hacienda);
    assert_eq!(ids(&apply_advanced_filters(&data, Some(&group))), vec![2, 5]);
}

#[test]
fn test_bad_condition_does_not_abort_tree() {
    let data = sample_records();
    let group = FilterGroup::root()
        .with_condition(FilterCondition::new("c1", "valor", Operator::Between, json!("0-100")))
        .with_condition(FilterCondition::new("c2", "nombre", Operator::Unknown("fuzzy".into()), json!("x")));
    assert!(apply_advanced_filters(&data, Some(&group)).is_empty());

    let group = FilterGroup::root()
        .with_condition(FilterCondition::new("c1", "valor", Operator::NotBetween, json!("0-100")))
        .with_condition(FilterCondition::new("c2", "nombre", Operator::Unknown("fuzzy".into()), json!("x")));
    assert_eq!(apply_advanced_filters(&data, Some(&group)).len(), data.len());
}

#[test]
fn test_date_range() {
    let data = sample_records();
    let group = FilterGroup::root().with_condition(
        FilterCondition::new(
            "c1",
            "fecha_creacion",
            Operator::Between,
            json!(["2024-01-01", "2024-12-31"]),
        )
        .with_data_type(DataType::Date),
    );
    assert_eq!(ids(&apply_advanced_filters(&data, Some(&group))), vec![2, 5]);
}

#[test]
fn test_is_null_on_catalogue() {
    let data = sample_records();
    let group = FilterGroup::root().with_condition(FilterCondition::new(
        "c1",
        "descripcion",
        Operator::IsNull,
        json!(null),
    ));
    assert_eq!(ids(&apply_advanced_filters(&data, Some(&group))), vec![4]);

    let group = FilterGroup::root().with_condition(FilterCondition::new(
        "c1",
        "fecha_creacion",
        Operator::IsNull,
        json!(null),
    ));
    assert_eq!(ids(&apply_advanced_filters(&data, Some(&group))), vec![4]);
}

#[test]
fn test_numeric_string_field_compares_as_number() {
    let r = record(json!({"valor": "15000"}));
    let c = FilterCondition::new("c", "valor", Operator::Between, json!([10000, 20000]));
    assert!(evaluate_condition(&r, &c));
    assert!(evaluate_filter_group(&r, &FilterGroup::root().with_condition(c)));
}

#[test]
fn test_group_deserialized_from_builder_json() {
    let group: FilterGroup = serde_json::from_str(
        r#"{
            "id": "root",
            "operator": "AND",
            "conditions": [
                {"id": "condition_1", "field": "nombre", "operator": "contains", "value": "certificado", "dataType": "string"}
            ],
            "groups": [
                {"id": "group_1", "operator": "OR", "conditions": [
                    {"id": "condition_2", "field": "tipo", "operator": "equals", "value": "opa", "dataType": "string"},
                    {"id": "condition_3", "field": "valor", "operator": "equals", "value": 0, "dataType": "number"}
                ], "groups": []}
            ]
        }"#,
    )
    .unwrap();
    let data = sample_records();
    assert_eq!(ids(&apply_advanced_filters(&data, Some(&group))), vec![1]);
}
