use thiserror::Error;

/// Error taxonomy shared by every operation in the core
#[derive(Error, Debug)]
pub enum OperationsError {
    #[error("Not found: {kind} '{id}'")]
    NotFound { kind: &'static str, id: String },

    #[error("Validation failed: missing or invalid {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("Invalid session state: session '{token}' is {state}: {reason}")]
    InvalidSessionState {
        token: String,
        state: String,
        reason: String,
    },

    #[error("Structural error: {reason}")]
    Structural { reason: String },

    #[error("Unsupported content: {reason}")]
    UnsupportedContent { reason: String },

    #[error("Repository error ({repository}): {reason}")]
    Repository {
        repository: &'static str,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OperationsError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn structural(reason: impl Into<String>) -> Self {
        Self::Structural {
            reason: reason.into(),
        }
    }

    pub fn unsupported_content(reason: impl Into<String>) -> Self {
        Self::UnsupportedContent {
            reason: reason.into(),
        }
    }

    /// Stable snake_case name of the error kind, used in structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation",
            Self::InvalidSessionState { .. } => "invalid_session_state",
            Self::Structural { .. } => "structural",
            Self::UnsupportedContent { .. } => "unsupported_content",
            Self::Repository { .. } => "repository",
            Self::Configuration(_) => "configuration",
            Self::Serialization(_) => "serialization",
        }
    }
}

impl From<config::ConfigError> for OperationsError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

pub type OperationsResult<T> = std::result::Result<T, OperationsError>;
