use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordsError {
    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("No {entity} ids left")]
    IdExhausted { entity: String },

    #[error("Configuration error in `{field}`: {message}")]
    ConfigError { field: String, message: String },

    #[error("Scenario step {step} ({op}) failed: {message}")]
    ScenarioError {
        step: usize,
        op: String,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecordsError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Configuration,
    Execution,
    System,
}

impl RecordsError {
    pub fn invalid_argument(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn id_exhausted(entity: &str) -> Self {
        Self::IdExhausted {
            entity: entity.to_string(),
        }
    }

    pub fn config(field: &str, message: impl Into<String>) -> Self {
        Self::ConfigError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::Input,
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::ConfigError { .. } | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::ScenarioError { .. } | Self::IdExhausted { .. } => ErrorCategory::Execution,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// Process exit code used by the CLI driver.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Lookup | ErrorCategory::Configuration => 1,
            ErrorCategory::Execution => 2,
            ErrorCategory::System => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { field, reason } => {
                format!("The value given for {} was rejected: {}", field, reason)
            }
            Self::NotFound { entity, id } => format!("No {} with id {} exists", entity, id),
            Self::IdExhausted { entity } => {
                format!("Every {} id has been used; no more can be created", entity)
            }
            Self::ConfigError { field, message } => {
                format!("The scenario configuration is invalid ({}): {}", field, message)
            }
            Self::ScenarioError { step, op, message } => {
                format!("The scenario stopped at step {} ({}): {}", step, op, message)
            }
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::TomlError(e) => format!("The scenario file is not valid TOML: {}", e),
            Self::SerializationError(e) => format!("Could not render the report: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Names may only use letters, digits, spaces and : , . / & _ - (max 100 chars); grades must be integers from 0 to 100"
            }
            ErrorCategory::Lookup => "Check that the course, assignment and student ids exist and that the student is enrolled",
            ErrorCategory::Configuration => "Fix the scenario file and run again",
            ErrorCategory::Execution => "Set `stop_on_error = false` in the [run] table to continue past failing steps",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }
}
