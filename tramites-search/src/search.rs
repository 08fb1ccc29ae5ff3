//! Combined listing search over trámites and OPAs, as used by the public
//! catalogue and the staff management panels.
//!
//! Stages run in a fixed order: service kind, simple field filters, the
//! advanced filter tree, then the free-text query. Pagination applies last.

use crate::coerce::{strict_equals, to_display_string};
use crate::config::{PortalConfig, DEFAULT_PAGE_SIZE};
use crate::group::{evaluate_filter_group, FilterGroup};
use crate::normalize::{normalize_for_search, search_matches, SearchOptions};
use crate::ServiceRecord;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Record key holding the service kind (`"tramite"` or `"opa"`).
pub const KIND_FIELD: &str = "tipo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Tramite,
    Opa,
}

impl ServiceKind {
    pub fn of(record: &ServiceRecord) -> Option<ServiceKind> {
        record
            .get(KIND_FIELD)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::Tramite => "Trámite",
            ServiceKind::Opa => "OPA",
        }
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_for_search(s).as_str() {
            "tramite" | "tramites" => Ok(ServiceKind::Tramite),
            "opa" | "opas" => Ok(ServiceKind::Opa),
            _ => Err(format!("Invalid service kind: {}", s)),
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceKind::Tramite => write!(f, "tramite"),
            ServiceKind::Opa => write!(f, "opa"),
        }
    }
}

pub fn default_search_fields() -> Vec<String> {
    ["nombre", "descripcion", "codigo_unico"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UnifiedSearch {
    pub query: String,
    pub search_fields: Vec<String>,
    pub options: SearchOptions,
    pub kind: Option<ServiceKind>,
    /// Field equality filters; `null` and `""` entries are ignored.
    pub filters: IndexMap<String, Value>,
    pub advanced: Option<FilterGroup>,
    /// 1-based.
    pub page: usize,
    /// 0 returns every match on one page.
    pub page_size: usize,
}

impl Default for UnifiedSearch {
    fn default() -> Self {
        Self {
            query: String::new(),
            search_fields: default_search_fields(),
            options: SearchOptions::default(),
            kind: None,
            filters: IndexMap::new(),
            advanced: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl UnifiedSearch {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn from_config(query: impl Into<String>, config: &PortalConfig) -> Self {
        let mut search = Self::new(query);
        search.search_fields = config.search_fields.clone();
        search.page_size = config.page_size;
        search.options.fuzzy_tolerance = config.fuzzy_tolerance;
        search
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_kind(mut self, kind: ServiceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filters.insert(field.into(), value);
        self
    }

    pub fn with_advanced(mut self, group: FilterGroup) -> Self {
        self.advanced = Some(group);
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub items: Vec<ServiceRecord>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    /// Trámites among all matches, not just this page.
    pub tramites: usize,
    pub opas: usize,
}

fn searchable_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(to_display_string(other)),
    }
}

/// Whether any of `fields` matches `query`. A blank query matches everything.
pub fn matches_query(
    record: &ServiceRecord,
    query: &str,
    fields: &[String],
    options: &SearchOptions,
) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        record
            .get(field)
            .and_then(searchable_text)
            .map_or(false, |text| search_matches(query, &text, options))
    })
}

/// Whether the record equals every set filter value.
pub fn matches_simple_filters(record: &ServiceRecord, filters: &IndexMap<String, Value>) -> bool {
    filters
        .iter()
        .filter(|(_, expected)| match expected {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
        .all(|(field, expected)| strict_equals(record.get(field), expected))
}

pub fn search_services(records: &[ServiceRecord], request: &UnifiedSearch) -> SearchPage {
    let by_kind: Vec<&ServiceRecord> = records
        .iter()
        .filter(|record| {
            request
                .kind
                .map_or(true, |kind| ServiceKind::of(record) == Some(kind))
        })
        .collect();
    let by_filters: Vec<&ServiceRecord> = by_kind
        .iter()
        .copied()
        .filter(|record| matches_simple_filters(record, &request.filters))
        .filter(|record| {
            request
                .advanced
                .as_ref()
                .map_or(true, |group| evaluate_filter_group(record, group))
        })
        .collect();
    let matched: Vec<&ServiceRecord> = by_filters
        .iter()
        .copied()
        .filter(|record| {
            matches_query(
                record,
                &request.query,
                &request.search_fields,
                &request.options,
            )
        })
        .collect();
    debug!(
        "Unified search {:?}: {} records, {} after kind, {} after filters, {} after query",
        request.query,
        records.len(),
        by_kind.len(),
        by_filters.len(),
        matched.len()
    );

    let total = matched.len();
    let tramites = matched
        .iter()
        .filter(|record| ServiceKind::of(record) == Some(ServiceKind::Tramite))
        .count();
    let opas = matched
        .iter()
        .filter(|record| ServiceKind::of(record) == Some(ServiceKind::Opa))
        .count();

    let page = request.page.max(1);
    let (items, page_size, total_pages): (Vec<ServiceRecord>, usize, usize) =
        if request.page_size == 0 {
            (
                matched.into_iter().cloned().collect(),
                total,
                usize::from(total > 0),
            )
        } else {
            (
                matched
                    .into_iter()
                    .skip((page - 1).saturating_mul(request.page_size))
                    .take(request.page_size)
                    .cloned()
                    .collect(),
                request.page_size,
                total.div_ceil(request.page_size),
            )
        };

    SearchPage {
        items,
        total,
        page,
        page_size,
        total_pages,
        tramites,
        opas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_kind_parse() {
        assert_eq!("Trámite".parse::<ServiceKind>(), Ok(ServiceKind::Tramite));
        assert_eq!("OPAs".parse::<ServiceKind>(), Ok(ServiceKind::Opa));
        assert!("licencia".parse::<ServiceKind>().is_err());
        assert_eq!(
            serde_json::to_value(ServiceKind::Tramite).unwrap(),
            json!("tramite")
        );
    }

    #[test]
    fn test_simple_filters_skip_blank_values() {
        let record = json!({"dependencia_id": 4, "tiene_pago": true})
            .as_object()
            .cloned()
            .unwrap();
        let mut filters = IndexMap::new();
        filters.insert("dependencia_id".to_string(), json!(4));
        filters.insert("subdependencia_id".to_string(), json!(""));
        filters.insert("estado".to_string(), Value::Null);
        assert!(matches_simple_filters(&record, &filters));
        filters.insert("tiene_pago".to_string(), json!(false));
        assert!(!matches_simple_filters(&record, &filters));
    }

    #[test]
    fn test_matches_query_across_fields() {
        let record = json!({"nombre": "Paz y salvo", "codigo_unico": "T-0042", "valor": 12000})
            .as_object()
            .cloned()
            .unwrap();
        let fields = vec![
            "nombre".to_string(),
            "codigo_unico".to_string(),
            "valor".to_string(),
        ];
        let opts = SearchOptions::default();
        assert!(matches_query(&record, "t-0042", &fields, &opts));
        assert!(matches_query(&record, "12000", &fields, &opts));
        assert!(matches_query(&record, "   ", &fields, &opts));
        assert!(!matches_query(&record, "licencia", &fields, &opts));
    }
}
