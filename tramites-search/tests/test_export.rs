use chrono::{TimeZone, Utc};
use serde_json::json;
use tempfile::tempdir;
use tramites_search::{
    export_filter_group, import_filter_group, FilterCondition, FilterError, FilterExport,
    FilterGroup, GroupOperator, Operator,
};

fn sample_group() -> FilterGroup {
    FilterGroup::root()
        .with_condition(FilterCondition::new(
            "c1",
            "tiene_pago",
            Operator::Equals,
            json!(false),
        ))
        .with_group(
            FilterGroup::new("g1", GroupOperator::Or)
                .with_condition(FilterCondition::new("c2", "valor", Operator::Between, json!([0, 100]))),
        )
}

#[test]
fn test_export_then_import_restores_tree() {
    let now = Utc.with_ymd_and_hms(2025, 7, 20, 8, 30, 0).unwrap();
    let (file_name, json) = export_filter_group(&sample_group(), now).unwrap();
    assert_eq!(file_name, "filtros-avanzados-2025-07-20.json");
    assert_eq!(import_filter_group(&json).unwrap(), sample_group());
}

#[test]
fn test_write_to_dir_and_read_back() {
    let dir = tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
    let export = FilterExport::new(sample_group(), now);
    let path = export.write_to_dir(dir.path()).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "filtros-avanzados-2025-01-02.json"
    );
    assert_eq!(FilterExport::read_from_file(&path).unwrap(), sample_group());
}

#[test]
fn test_read_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = FilterExport::read_from_file(dir.path().join("nope.json"));
    assert!(matches!(result, Err(FilterError::Io(_))));
}

#[test]
fn test_import_requires_filter_group() {
    let json = r#"{"version": "1.0", "timestamp": "2025-01-01T00:00:00.000Z"}"#;
    assert!(matches!(import_filter_group(json), Err(FilterError::Json(_))));
}
