use crate::core::node::FieldId;

/// A rejected option update. Recoverable: the panel shows the message inline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Option<FieldId>,
    pub message: String,
}

impl ValidationError {
    pub fn for_field(field: impl Into<FieldId>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Malformed manifest entry. Aborts panel construction.
    #[error("Option '{field}' is misconfigured: {reason}")]
    Configuration { field: FieldId, reason: String },

    #[error("No screen target with id '{0}'")]
    TargetNotFound(String),

    #[error("Editor kind '{0}' is not registered")]
    UnknownEditor(String),

    #[error("Manifest could not be parsed: {0}")]
    Manifest(String),

    #[error("Configuration could not be parsed: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EditorError {
    pub fn configuration(field: impl Into<FieldId>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Manifest(err.to_string())
    }
}

impl From<serde_yaml::Error> for EditorError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Manifest(err.to_string())
    }
}
