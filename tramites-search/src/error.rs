/// Errors from loading, editing and exchanging filter definitions.
///
/// Evaluation itself never fails; see [`crate::evaluate_condition`].
#[derive(Debug)]
pub enum FilterError {
    Json(serde_json::Error),
    Yaml(serde_yaml_ng::Error),
    Io(std::io::Error),
    UnsupportedFormat(String),
    UnsupportedVersion(String),
    GroupNotFound(String),
    ConditionNotFound(String),
    RootGroupRemoval,
    MaxDepthExceeded { depth: usize, max: usize },
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::Json(err)
    }
}

impl From<serde_yaml_ng::Error> for FilterError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        FilterError::Yaml(err)
    }
}

impl From<std::io::Error> for FilterError {
    fn from(err: std::io::Error) -> Self {
        FilterError::Io(err)
    }
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::Json(err) => write!(f, "JSON error: {}", err),
            FilterError::Yaml(err) => write!(f, "YAML error: {}", err),
            FilterError::Io(err) => write!(f, "IO error: {}", err),
            FilterError::UnsupportedFormat(path) => {
                write!(f, "Unsupported file format: {}. Use '.json' or '.yaml'.", path)
            }
            FilterError::UnsupportedVersion(version) => {
                write!(f, "Unsupported filter export version: {}", version)
            }
            FilterError::GroupNotFound(id) => write!(f, "Filter group not found: {}", id),
            FilterError::ConditionNotFound(id) => write!(f, "Filter condition not found: {}", id),
            FilterError::RootGroupRemoval => write!(f, "The root filter group cannot be removed"),
            FilterError::MaxDepthExceeded { depth, max } => write!(
                f,
                "Cannot nest a group at depth {}: maximum nesting depth is {}",
                depth, max
            ),
        }
    }
}

impl std::error::Error for FilterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FilterError::Json(err) => Some(err),
            FilterError::Yaml(err) => Some(err),
            FilterError::Io(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
