pub mod input;

use std::path::PathBuf;

/// Error type for CLI input failures
#[derive(Debug)]
pub enum CliError {
    RecordsLoad(PathBuf, anyhow::Error),
    FilterLoad(PathBuf, anyhow::Error),
    InvalidEqualityFilter(String),
    ValidationFailed(usize),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::RecordsLoad(path, e) => {
                write!(
                    f,
                    "Failed to load records from {}: {e}\n\nPossible fixes:\n  - Ensure the file exists and is readable\n  - The file must contain a JSON array of objects, e.g. [{{\"nombre\": \"...\"}}]",
                    path.display()
                )
            }
            CliError::FilterLoad(path, e) => {
                write!(
                    f,
                    "Failed to load filter from {}: {e}\n\nThe file must hold either an exported filter document (with \"version\" and \"filterGroup\") or a bare filter group (with \"id\" and \"operator\").",
                    path.display()
                )
            }
            CliError::InvalidEqualityFilter(arg) => {
                write!(
                    f,
                    "Invalid equality filter: '{}'\n\nUse --eq FIELD=VALUE, e.g. --eq dependencia_id=3 or --eq tiene_pago=false",
                    arg
                )
            }
            CliError::ValidationFailed(count) => {
                write!(f, "Filter validation failed with {} problem(s)", count)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::RecordsLoad(_, e) => Some(&**e),
            CliError::FilterLoad(_, e) => Some(&**e),
            CliError::InvalidEqualityFilter(_) => None,
            CliError::ValidationFailed(_) => None,
        }
    }
}
