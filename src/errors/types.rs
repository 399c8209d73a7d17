//! # Error Types
//!
//! Error types for the load balancer API using `thiserror`.
//!
//! Request-level failures are classified here so the HTTP layer only has to map
//! a variant to a status code. Everything the persistence layer reports is
//! funnelled into [`LbApiError::Database`].

/// Custom result type for load balancer API operations
pub type Result<T> = std::result::Result<T, LbApiError>;

/// Main error type for the load balancer API
#[derive(thiserror::Error, Debug)]
pub enum LbApiError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Tenant context is missing or is not a UUID
    #[error("Invalid tenant: {message}")]
    InvalidTenant { message: String },

    /// An identifier parameter is not a well-formed UUID
    #[error("Invalid identifier for '{parameter}': '{value}' is not a valid UUID")]
    InvalidIdentifier { parameter: String, value: String },

    /// A filter parameter could not be parsed
    #[error("Invalid value for '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Payload validation errors
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// A create request carried no rows
    #[error("Empty payload: at least one frontend is required")]
    EmptyPayload,

    /// Filter matched no rows
    #[error("Resource not found: {message}")]
    NotFound { resource_type: String, message: String },

    /// Delete filter matched more than one row
    #[error("Ambiguous request: filter matched {matches} {resource_type} rows")]
    Ambiguous { resource_type: String, matches: usize },

    /// Database and storage errors
    #[error("Database error: {context}")]
    Database {
        #[source]
        source: sqlx::Error,
        context: String,
    },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Network transport errors (listener bind, serve)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Internal server errors
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl LbApiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    pub fn invalid_tenant<S: Into<String>>(message: S) -> Self {
        Self::InvalidTenant { message: message.into() }
    }

    pub fn invalid_identifier<P: Into<String>, V: Into<String>>(parameter: P, value: V) -> Self {
        Self::InvalidIdentifier { parameter: parameter.into(), value: value.into() }
    }

    pub fn invalid_parameter<P: Into<String>, M: Into<String>>(parameter: P, message: M) -> Self {
        Self::InvalidParameter { parameter: parameter.into(), message: message.into() }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Create a not found error
    pub fn not_found<R: Into<String>, M: Into<String>>(resource_type: R, message: M) -> Self {
        Self::NotFound { resource_type: resource_type.into(), message: message.into() }
    }

    pub fn ambiguous<R: Into<String>>(resource_type: R, matches: usize) -> Self {
        Self::Ambiguous { resource_type: resource_type.into(), matches }
    }

    /// Wrap a store error with context
    pub fn database<S: Into<String>>(source: sqlx::Error, context: S) -> Self {
        Self::Database { source, context: context.into() }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    /// Create an internal server error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Get the HTTP status code that should be returned for this error
    pub fn status_code(&self) -> u16 {
        match self {
            LbApiError::InvalidTenant { .. } => 400,
            LbApiError::InvalidIdentifier { .. } => 400,
            LbApiError::InvalidParameter { .. } => 400,
            LbApiError::Validation { .. } => 400,
            LbApiError::EmptyPayload => 422,
            LbApiError::NotFound { .. } => 404,
            LbApiError::Ambiguous { .. } => 409,
            LbApiError::Config { .. } => 500,
            LbApiError::Database { .. } => 500,
            LbApiError::Io { .. } => 500,
            LbApiError::Transport(_) => 500,
            LbApiError::Internal { .. } => 500,
        }
    }

    /// True for failures reported by the persistence layer
    pub fn is_store_failure(&self) -> bool {
        matches!(self, LbApiError::Database { .. })
    }

    /// True for failures caused by the request itself
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

// Error conversions for common external error types
impl From<sqlx::Error> for LbApiError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database { source: error, context: "Database operation failed".to_string() }
    }
}

impl From<std::io::Error> for LbApiError {
    fn from(error: std::io::Error) -> Self {
        Self::Io { source: error, context: "I/O operation failed".to_string() }
    }
}

impl From<config::ConfigError> for LbApiError {
    fn from(error: config::ConfigError) -> Self {
        Self::config_with_source("Configuration loading failed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for LbApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        match fields.first() {
            Some((field, _)) => {
                Self::validation_field(format!("Validation failed: {}", message), field.to_string())
            }
            None => Self::validation("Validation failed"),
        }
    }
}
