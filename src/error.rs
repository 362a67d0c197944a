use std::path::PathBuf;

use thiserror::Error;

use crate::intent::Action;

/// Faults raised by the query pipeline.
///
/// `ModelNotFound` and `ModelInvalid` are fatal at startup: the process
/// must not serve queries without its classifier artifacts. The executor
/// faults (`ColumnNotFound`, `TypeMismatch`, `IntentIncomplete`) are caught
/// at the orchestration boundary and turned into user-facing messages.
/// Unparseable queries are not errors at all; they surface as an empty
/// [`crate::query::ResolvedIntent`].
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("model artifact not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("invalid model artifact {path}: {message}")]
    ModelInvalid { path: PathBuf, message: String },

    #[error("column '{0}' not found in table")]
    ColumnNotFound(String),

    #[error("column '{column}' must be numeric for {action}")]
    TypeMismatch { column: String, action: Action },

    #[error("query resolved without both an action and a target column")]
    IntentIncomplete,
}
