//! Search and advanced filtering for the citizen services catalogue.
//!
//! Records are untyped JSON objects (trámites and OPAs share one shape) and
//! are matched either by free text, with Spanish diacritics folded away, or
//! by a tree of field conditions combined with `AND`/`OR`.

pub mod coerce;
pub mod condition;
pub mod config;
pub mod error;
pub mod export;
pub mod fields;
pub mod group;
pub mod normalize;
pub mod search;
pub mod tree;
pub mod validate;

/// A trámite or OPA as delivered by the data layer; fields are looked up by
/// name at evaluation time.
pub type ServiceRecord = serde_json::Map<String, serde_json::Value>;

pub use condition::{evaluate_condition, DataType, FilterCondition, Operator};
pub use config::PortalConfig;
pub use error::{FilterError, Result};
pub use export::{export_filter_group, import_filter_group, FilterExport};
pub use fields::{default_service_fields, operators_for, FieldDefinition, FieldOption};
pub use group::{
    apply_advanced_filters, evaluate_filter_group, FilterGroup, GroupOperator, ROOT_GROUP_ID,
};
pub use normalize::{
    levenshtein_distance, normalize_for_search, normalize_text, search_matches, SearchOptions,
};
pub use search::{search_services, SearchPage, ServiceKind, UnifiedSearch};
pub use tree::{ConditionUpdate, FilterTree, DEFAULT_MAX_DEPTH};
pub use validate::{validate_against_fields, validate_filter_group};

/// Parses a JSON array of records, as served by the listing endpoints.
pub fn records_from_json(input: &str) -> Result<Vec<ServiceRecord>> {
    Ok(serde_json::from_str(input)?)
}
