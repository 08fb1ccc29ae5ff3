//! Reading records and filters from files given on the command line.

use crate::CliError;
use serde_json::Value;
use std::path::Path;
use tramites_search::{FilterGroup, ServiceRecord};

pub fn load_records(path: &Path) -> Result<Vec<ServiceRecord>, CliError> {
    let input = fs_err::read_to_string(path)
        .map_err(|e| CliError::RecordsLoad(path.to_path_buf(), e.into()))?;
    tramites_search::records_from_json(&input)
        .map_err(|e| CliError::RecordsLoad(path.to_path_buf(), e.into()))
}

/// Accepts either an export document or a bare filter group.
pub fn load_filter_group(path: &Path) -> Result<FilterGroup, CliError> {
    let fail = |e: anyhow::Error| CliError::FilterLoad(path.to_path_buf(), e);
    let input = fs_err::read_to_string(path).map_err(|e| fail(e.into()))?;
    let doc: Value = serde_json::from_str(&input).map_err(|e| fail(e.into()))?;
    if doc.get("filterGroup").is_some() {
        tramites_search::import_filter_group(&input).map_err(|e| fail(e.into()))
    } else {
        serde_json::from_value(doc).map_err(|e| fail(e.into()))
    }
}

/// Parses `FIELD=VALUE`. The value is read as JSON when possible, so
/// `3` and `false` are typed while `Hacienda` stays a string.
pub fn parse_equality_filter(arg: &str) -> Result<(String, Value), CliError> {
    let (field, raw) = arg
        .split_once('=')
        .ok_or_else(|| CliError::InvalidEqualityFilter(arg.to_string()))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(CliError::InvalidEqualityFilter(arg.to_string()));
    }
    let raw = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((field.to_string(), value))
}

