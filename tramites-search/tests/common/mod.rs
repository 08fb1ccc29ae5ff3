//! Shared service records for the tramites-search integration tests

#![allow(dead_code)]

use serde_json::json;
use tramites_search::ServiceRecord;

/// Catalogue mixing trámites and OPAs, with accents and uneven field types.
pub const SAMPLE_RECORDS: &str = r#"[
    {"id": 1, "tipo": "tramite", "codigo_unico": "T-001", "nombre": "Certificado de Residencia",
     "descripcion": "Certificación de residencia en el municipio", "dependencia": "Secretaría de Gobierno",
     "dependencia_id": 1, "tiene_pago": false, "valor": 0, "activo": true, "fecha_creacion": "2023-02-10"},
    {"id": 2, "tipo": "tramite", "codigo_unico": "T-002", "nombre": "Licencia de Construcción",
     "descripcion": "Autorización para obras nuevas", "dependencia": "Planeación",
     "dependencia_id": 2, "tiene_pago": true, "valor": 450000, "activo": true, "fecha_creacion": "2024-05-01"},
    {"id": 3, "tipo": "opa", "codigo_unico": "O-001", "nombre": "Estratificación Socioeconómica",
     "descripcion": "Consulta del estrato de un predio", "dependencia": "Planeación",
     "dependencia_id": 2, "tiene_pago": false, "valor": null, "activo": true, "fecha_creacion": "2022-11-30"},
    {"id": 4, "tipo": "opa", "codigo_unico": "O-002", "nombre": "Información tributaria",
     "descripcion": "", "dependencia": "Hacienda",
     "dependencia_id": 3, "tiene_pago": true, "valor": "15000", "activo": false},
    {"id": 5, "tipo": "tramite", "codigo_unico": "T-003", "nombre": "Paz y salvo predial",
     "descripcion": "Certificado de paz y salvo del impuesto predial", "dependencia": "Hacienda",
     "dependencia_id": 3, "tiene_pago": true, "valor": 8500, "activo": true, "fecha_creacion": "2024-01-15"}
]"#;

pub fn sample_records() -> Vec<ServiceRecord> {
    tramites_search::records_from_json(SAMPLE_RECORDS).unwrap()
}

pub fn record(value: serde_json::Value) -> ServiceRecord {
    value.as_object().cloned().unwrap()
}

pub fn ids(records: &[ServiceRecord]) -> Vec<i64> {
    records
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

pub fn two_record_catalogue() -> Vec<ServiceRecord> {
    vec![
        record(json!({"nombre": "Certificado de Residencia", "tiene_pago": false})),
        record(json!({"nombre": "Licencia de Construcción", "tiene_pago": true})),
    ]
}

/// Routes `log` output through the test harness; run with `RUST_LOG=debug`.
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
