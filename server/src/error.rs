//! Service-wide error types
//!
//! Provides a unified error type that maps onto the caller-visible failure
//! taxonomy: validation failures, missing records, and storage failures.
//! `From<Error> for HttpResponse` (in `http::response`) converts errors into
//! the appropriate HTTP status and JSON body, so handlers propagate with `?`.

use std::collections::HashMap;

use thiserror::Error as ThisError;

/// Field-level validation errors collected from the `validator` crate.
///
/// Converted to a `{"message": ..., "errors": {field: [messages]}}` JSON
/// body when surfaced over HTTP.
#[derive(Debug, Clone)]
pub struct ValidationErrors {
    /// Map of field names to their validation error messages
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Add an error for a specific field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Convert from the validator crate's error collection
    pub fn from_validator(errors: validator::ValidationErrors) -> Self {
        let mut result = Self::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation failed for field '{}'", field));
                result.add(field.to_string(), message);
            }
        }
        result
    }

    /// Convert to a JSON value for the response body
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "message": "The given data was invalid.",
            "errors": self.errors
        })
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed: {:?}", self.errors)
    }
}

impl std::error::Error for ValidationErrors {}

/// All failures a request can surface.
///
/// Handlers never catch-and-suppress; every store failure propagates here
/// and is converted at the response boundary.
#[derive(Debug, Clone, ThisError)]
pub enum Error {
    /// Input failed schema constraints (422 Unprocessable Entity)
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// Referenced record does not exist (404 Not Found)
    #[error("{resource} with id {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    /// Underlying persistence failure (500, opaque to the caller)
    #[error("Database error: {0}")]
    Database(String),

    /// Request body could not be parsed (400 Bad Request)
    #[error("{message}")]
    BadRequest { message: String },

    /// Missing route parameter (400 Bad Request)
    #[error("Missing required parameter: {param_name}")]
    MissingParam { param_name: String },

    /// Route parameter could not be parsed to the expected type (400)
    #[error("Invalid parameter '{param}': expected {expected_type}")]
    ParamParse {
        param: String,
        expected_type: &'static str,
    },

    /// Generic internal server error (500)
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Create a Validation error from collected field errors
    pub fn validation_errors(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }

    /// Create a NotFound error (404)
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    /// Create a Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create a BadRequest error (400)
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a MissingParam error (400)
    pub fn param(name: impl Into<String>) -> Self {
        Self::MissingParam {
            param_name: name.into(),
        }
    }

    /// Create a ParamParse error (400)
    pub fn param_parse(param: impl Into<String>, expected_type: &'static str) -> Self {
        Self::ParamParse {
            param: param.into(),
            expected_type,
        }
    }

    /// Create an Internal error (500)
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 422,
            Self::NotFound { .. } => 404,
            Self::Database(_) => 500,
            Self::BadRequest { .. } => 400,
            Self::MissingParam { .. } => 400,
            Self::ParamParse { .. } => 400,
            Self::Internal { .. } => 500,
        }
    }
}

impl From<sea_orm::DbErr> for Error {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::internal(format!("Failed to serialize response: {}", e))
    }
}
