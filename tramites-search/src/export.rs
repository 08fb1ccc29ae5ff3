//! Saving and restoring advanced filters as downloadable JSON documents.

use crate::error::{FilterError, Result};
use crate::group::FilterGroup;
use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const EXPORT_VERSION: &str = "1.0";
const EXPORT_FILE_PREFIX: &str = "filtros-avanzados";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterExport {
    pub version: String,
    /// ISO-8601 UTC instant, millisecond precision.
    pub timestamp: String,
    pub filter_group: FilterGroup,
}

impl FilterExport {
    pub fn new(filter_group: FilterGroup, now: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            filter_group,
        }
    }

    /// `filtros-avanzados-YYYY-MM-DD.json` for the export date.
    pub fn file_name(&self) -> String {
        let date = DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|dt| dt.with_timezone(&Utc).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| self.timestamp.chars().take(10).collect());
        format!("{}-{}.json", EXPORT_FILE_PREFIX, date)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document into `dir` under [`FilterExport::file_name`].
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        fs_err::write(&path, self.to_json_pretty()?)?;
        info!("Wrote filter export to {}", path.display());
        Ok(path)
    }

    pub fn read_from_file(path: impl AsRef<Path>) -> Result<FilterGroup> {
        import_filter_group(&fs_err::read_to_string(path.as_ref())?)
    }
}

/// Serializes `group` for download, returning `(file_name, json)`.
pub fn export_filter_group(group: &FilterGroup, now: DateTime<Utc>) -> Result<(String, String)> {
    let export = FilterExport::new(group.clone(), now);
    let json = export.to_json_pretty()?;
    let file_name = export.file_name();
    info!(
        "Exported filter group with {} conditions as {}",
        group.condition_count(),
        file_name
    );
    Ok((file_name, json))
}

/// Reads a document produced by [`export_filter_group`].
pub fn import_filter_group(json: &str) -> Result<FilterGroup> {
    let export: FilterExport = serde_json::from_str(json)?;
    if export.version != EXPORT_VERSION {
        return Err(FilterError::UnsupportedVersion(export.version));
    }
    Ok(export.filter_group)
}
