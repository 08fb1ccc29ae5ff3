//! Integration tests for reading CLI inputs and the errors they report.

use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use tramites_cli::input::{load_filter_group, load_records, parse_equality_filter};
use tramites_cli::CliError;

fn temp_file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const GROUP: &str = r#"{
    "id": "root",
    "operator": "OR",
    "conditions": [
        {"id": "c1", "field": "tipo", "operator": "equals", "value": "opa", "dataType": "string"}
    ],
    "groups": []
}"#;

#[test]
fn test_load_records_from_array() {
    let file = temp_file_with(r#"[{"nombre": "Paz y salvo"}, {"nombre": "Licencia"}]"#);
    let records = load_records(file.path()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["nombre"], "Licencia");
}

#[test]
fn test_load_records_rejects_object() {
    let file = temp_file_with(r#"{"nombre": "Paz y salvo"}"#);
    let error = load_records(file.path()).unwrap_err();
    assert!(matches!(error, CliError::RecordsLoad(_, _)));
    assert!(error.to_string().contains("JSON array of objects"));
}

#[test]
fn test_load_records_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let error = load_records(&path).unwrap_err();
    assert!(error.to_string().contains("missing.json"));
}

#[test]
fn test_load_filter_group_bare() {
    let file = temp_file_with(GROUP);
    let group = load_filter_group(file.path()).unwrap();
    assert_eq!(group.condition_count(), 1);
    assert_eq!(group.conditions[0].field, "tipo");
}

#[test]
fn test_load_filter_group_from_export() {
    let doc = format!(
        r#"{{"version": "1.0", "timestamp": "2024-06-01T10:00:00.000Z", "filterGroup": {}}}"#,
        GROUP
    );
    let file = temp_file_with(&doc);
    let group = load_filter_group(file.path()).unwrap();
    assert_eq!(group.id, "root");
    assert_eq!(group.condition_count(), 1);
}

#[test]
fn test_load_filter_group_rejects_unknown_version() {
    let doc = format!(
        r#"{{"version": "9.9", "timestamp": "2024-06-01T10:00:00.000Z", "filterGroup": {}}}"#,
        GROUP
    );
    let file = temp_file_with(&doc);
    let error = load_filter_group(file.path()).unwrap_err();
    assert!(matches!(error, CliError::FilterLoad(_, _)));
    assert!(error.to_string().contains("9.9"));
}

#[test]
fn test_parse_equality_filter_types() {
    assert_eq!(
        parse_equality_filter("dependencia_id=3").unwrap(),
        ("dependencia_id".to_string(), json!(3))
    );
    assert_eq!(
        parse_equality_filter("tiene_pago=false").unwrap(),
        ("tiene_pago".to_string(), json!(false))
    );
    assert_eq!(
        parse_equality_filter("dependencia_nombre=Secretaría de Hacienda").unwrap(),
        (
            "dependencia_nombre".to_string(),
            json!("Secretaría de Hacienda")
        )
    );
    assert_eq!(
        parse_equality_filter("codigo_unico='007'").unwrap(),
        ("codigo_unico".to_string(), json!("007"))
    );
}

#[test]
fn test_parse_equality_filter_rejects_malformed() {
    assert!(matches!(
        parse_equality_filter("dependencia"),
        Err(CliError::InvalidEqualityFilter(arg)) if arg == "dependencia"
    ));
    assert!(parse_equality_filter("=3").is_err());
}
