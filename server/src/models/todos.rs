//! Todos model
//!
//! Re-exports the entity for the `todos` table and maps database rows to
//! the shared wire type.

pub use super::entities::todos::*;

use sea_orm::entity::prelude::*;
use todo_schema::Todo;

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Todo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            completed: model.completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
