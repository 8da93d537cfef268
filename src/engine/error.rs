use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a recipe run.
///
/// Malformed answers never show up here: the input validator recovers from
/// them locally and asks again.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("{name} step is not implemented")]
    MissingHandler { name: String },

    #[error("input closed before a valid answer was given")]
    InputClosed,

    #[error("template {name}: {reason}")]
    Template { name: String, reason: String },

    #[error("unknown template {0}")]
    UnknownTemplate(String),

    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RecipeError {
    pub fn template(name: &str, reason: impl Into<String>) -> Self {
        RecipeError::Template {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
