use crate::error::{FilterError, Result};
use crate::fields::{default_service_fields, FieldDefinition};
use crate::normalize::DEFAULT_FUZZY_TOLERANCE;
use crate::search::default_search_fields;
use crate::tree::DEFAULT_MAX_DEPTH;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Search and filter settings for a portal deployment. Missing keys take
/// their defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub max_nesting_depth: usize,
    pub fuzzy_tolerance: f64,
    pub search_fields: Vec<String>,
    pub page_size: usize,
    pub fields: Vec<FieldDefinition>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_DEPTH,
            fuzzy_tolerance: DEFAULT_FUZZY_TOLERANCE,
            search_fields: default_search_fields(),
            page_size: DEFAULT_PAGE_SIZE,
            fields: default_service_fields(),
        }
    }
}

impl PortalConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = fs_err::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let config = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&input)?,
            Some("json") => Self::from_json_str(&input)?,
            _ => return Err(FilterError::UnsupportedFormat(path.display().to_string())),
        };
        info!(
            "Loaded portal configuration from {} ({} fields)",
            path.display(),
            config.fields.len()
        );
        Ok(config)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}
