//! Shared wire types for the todo service.
//!
//! The server and the client both depend on this crate, so the shape of a
//! todo and the validation rules for every operation input are defined in
//! exactly one place.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i32,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a todo.
///
/// Text must be 1-500 characters. Validation runs at the input boundary;
/// the store never re-checks it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTodoInput {
    #[validate(custom(function = validate_todo_text))]
    pub text: String,
}

fn validate_todo_text(text: &str) -> Result<(), ValidationError> {
    if text.is_empty() {
        let mut err = ValidationError::new("length");
        err.message = Some(Cow::Borrowed("Todo text cannot be empty"));
        return Err(err);
    }
    if text.chars().count() > 500 {
        let mut err = ValidationError::new("length");
        err.message = Some(Cow::Borrowed("Todo text too long"));
        return Err(err);
    }
    Ok(())
}

/// Input for setting a todo's completion status.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTodoCompletionInput {
    pub id: i32,
    pub completed: bool,
}

/// Input for deleting a todo.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteTodoInput {
    pub id: i32,
}

/// Response shape for a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTodoResult {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_messages(input: &CreateTodoInput) -> Vec<String> {
        let errors = input.validate().unwrap_err();
        errors
            .field_errors()
            .get("text")
            .map(|errs| {
                errs.iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn rejects_empty_text() {
        let input = CreateTodoInput {
            text: String::new(),
        };
        assert_eq!(text_messages(&input), vec!["Todo text cannot be empty"]);
    }

    #[test]
    fn rejects_text_over_500_chars() {
        let input = CreateTodoInput {
            text: "x".repeat(501),
        };
        assert_eq!(text_messages(&input), vec!["Todo text too long"]);
    }

    #[test]
    fn accepts_boundary_lengths() {
        for text in ["a".to_string(), "x".repeat(500)] {
            let input = CreateTodoInput { text };
            assert!(input.validate().is_ok());
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 500 multibyte characters are within the limit
        let input = CreateTodoInput {
            text: "\u{00e9}".repeat(500),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn todo_serializes_timestamps_as_rfc3339() {
        let todo = Todo {
            id: 1,
            text: "Buy milk".to_string(),
            completed: false,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            updated_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");
        assert_eq!(json["completed"], false);
    }
}
