//! Persistence store for todo records
//!
//! `TodoStore` owns the canonical record set. It is handed its connection
//! explicitly at construction, so tests run it against in-memory SQLite
//! through the same code path as production.

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, QueryOrder, Set};
use todo_schema::Todo;

use crate::database::DbConnection;
use crate::error::Error;
use crate::models::todos;

#[derive(Clone)]
pub struct TodoStore {
    db: DbConnection,
}

impl TodoStore {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a new record with `completed = false` and fresh timestamps
    ///
    /// Text is validated at the input boundary, not here.
    pub async fn insert(&self, text: &str) -> Result<Todo, Error> {
        let now = Utc::now();
        let row = todos::ActiveModel {
            text: Set(text.to_owned()),
            completed: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = row.insert(self.db.inner()).await?;
        Ok(inserted.into())
    }

    /// Return every record, newest first
    ///
    /// Ordered by `created_at` descending; ties fall back to `id` descending
    /// so rows created within the same instant keep insertion order.
    pub async fn list_all(&self) -> Result<Vec<Todo>, Error> {
        let rows = todos::Entity::find()
            .order_by_desc(todos::Column::CreatedAt)
            .order_by_desc(todos::Column::Id)
            .all(self.db.inner())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Set a record's completion status, refreshing `updated_at`
    ///
    /// `updated_at` always moves strictly forward, even when the clock has
    /// not advanced past the previous value at storage resolution.
    pub async fn update_completion(&self, id: i32, completed: bool) -> Result<Todo, Error> {
        let found = todos::Entity::find_by_id(id)
            .one(self.db.inner())
            .await?
            .ok_or_else(|| Error::not_found("Todo", id))?;

        let previous_updated_at = found.updated_at;
        let mut now = Utc::now();
        if now <= previous_updated_at {
            now = previous_updated_at + Duration::microseconds(1);
        }

        let mut row: todos::ActiveModel = found.into();
        row.completed = Set(completed);
        row.updated_at = Set(now);

        // A concurrent delete between the find and this update surfaces as
        // RecordNotUpdated, which the caller should see as not-found.
        let updated = row.update(self.db.inner()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => Error::not_found("Todo", id),
            other => other.into(),
        })?;

        Ok(updated.into())
    }

    /// Remove a record
    ///
    /// A missing id is an error, never a silent success. The delete is a
    /// single statement, so a racing delete on the same id loses cleanly.
    pub async fn delete_by_id(&self, id: i32) -> Result<(), Error> {
        let result = todos::Entity::delete_by_id(id)
            .exec(self.db.inner())
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::not_found("Todo", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::database::DatabaseConfig;
    use crate::migrations::{Migrator, MigratorTrait};

    async fn test_store() -> TodoStore {
        let config = DatabaseConfig::builder()
            .url("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .build();
        let db = DbConnection::connect(&config).await.expect("connect");
        Migrator::up(db.inner(), None).await.expect("migrate");
        TodoStore::new(db)
    }

    #[tokio::test]
    async fn insert_sets_defaults() {
        let store = test_store().await;

        let todo = store.insert("Buy milk").await.unwrap();

        assert_eq!(todo.text, "Buy milk");
        assert_eq!(todo.completed, false);
        assert_eq!(todo.created_at, todo.updated_at);
        assert!(todo.id >= 1);
    }

    #[tokio::test]
    async fn insert_assigns_fresh_ids() {
        let store = test_store().await;

        let first = store.insert("first").await.unwrap();
        let second = store.insert("second").await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn list_all_returns_newest_first() {
        let store = test_store().await;

        for text in ["oldest", "middle", "newest"] {
            store.insert(text).await.unwrap();
        }

        let todos = store.list_all().await.unwrap();
        let texts: Vec<&str> = todos.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn list_all_breaks_created_at_ties_by_id() {
        let store = test_store().await;

        // Two rows sharing one timestamp, inserted in order
        let now = Utc::now();
        for text in ["first", "second"] {
            let row = todos::ActiveModel {
                text: Set(text.to_string()),
                completed: Set(false),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            row.insert(store.db.inner()).await.unwrap();
        }

        let todos = store.list_all().await.unwrap();
        let texts: Vec<&str> = todos.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn list_all_on_empty_store_yields_empty_vec() {
        let store = test_store().await;
        assert_eq!(store.list_all().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn update_completion_touches_only_completed_and_updated_at() {
        let store = test_store().await;
        let created = store.insert("write tests").await.unwrap();

        let updated = store.update_completion(created.id, true).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.text, created.text);
        assert_eq!(updated.completed, true);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn update_completion_is_idempotent_on_value_monotonic_on_time() {
        let store = test_store().await;
        let created = store.insert("repeat me").await.unwrap();

        let first = store.update_completion(created.id, true).await.unwrap();
        let second = store.update_completion(created.id, true).await.unwrap();

        assert_eq!(first.completed, true);
        assert_eq!(second.completed, true);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_completion_unknown_id_is_not_found() {
        let store = test_store().await;
        store.insert("only one").await.unwrap();

        let err = store.update_completion(9999, true).await.unwrap_err();

        assert!(matches!(err, Error::NotFound { id: 9999, .. }));
        // Nothing was written
        let todos = store.list_all().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].completed, false);
    }

    #[tokio::test]
    async fn delete_is_final() {
        let store = test_store().await;
        let todo = store.insert("delete me").await.unwrap();

        store.delete_by_id(todo.id).await.unwrap();
        assert_eq!(store.list_all().await.unwrap(), vec![]);

        let err = store.delete_by_id(todo.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_records_untouched() {
        let store = test_store().await;
        let todo = store.insert("keep me").await.unwrap();

        let err = store.delete_by_id(todo.id + 1).await.unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
