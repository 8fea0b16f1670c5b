//! Error types for dependency checks

use thiserror::Error;

/// Result type for dependency checks
pub type Result<T> = std::result::Result<T, HealthCheckError>;

/// Errors that can make a dependency check fail
///
/// The `Display` output is the diagnostic printed next to the dependency
/// label, so it is worded for the operator running the check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthCheckError {
    /// Required configuration variables are absent; no connection was attempted
    #[error("Faltan variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    /// A configuration variable is present but cannot be used
    #[error("Valor inválido para {name}: '{value}'")]
    InvalidVariable { name: String, value: String },

    /// PostgreSQL connection, authentication or query failure
    #[error("Error de conexión: {0}")]
    Database(String),

    /// Redis connection, authentication or command failure
    #[error("Error de conexión: {0}")]
    Cache(String),
}

impl HealthCheckError {
    /// Create a missing-variables error
    pub fn missing_variables<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingVariables(names.into_iter().map(Into::into).collect())
    }

    /// Create an invalid-variable error
    pub fn invalid_variable(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidVariable {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a database error
    pub fn database(msg: impl ToString) -> Self {
        Self::Database(msg.to_string())
    }

    /// Create a cache error
    pub fn cache(msg: impl ToString) -> Self {
        Self::Cache(msg.to_string())
    }

    /// True when the check failed before touching the network
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingVariables(_) | Self::InvalidVariable { .. }
        )
    }
}
