//! Local list state
//!
//! `TodoList` holds the client's disposable copy of the record set. The
//! server stays authoritative: `load` replaces the whole list, and every
//! mutation touches local state only after the remote call has resolved
//! successfully. A failed call logs the error and leaves the list as it
//! was; there is no speculative update and therefore nothing to roll back.

use todo_schema::{CreateTodoInput, DeleteTodoInput, Todo, UpdateTodoCompletionInput};

use crate::api::{ClientError, TodoApi};

pub struct TodoList<A: TodoApi> {
    api: A,
    todos: Vec<Todo>,
}

impl<A: TodoApi> TodoList<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: Vec::new(),
        }
    }

    /// The current local copy, newest first
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Fetch all todos and replace the local list
    pub async fn load(&mut self) -> Result<(), ClientError> {
        match self.api.get_todos().await {
            Ok(todos) => {
                self.todos = todos;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("failed to load todos: {}", err);
                Err(err)
            }
        }
    }

    /// Create a todo and prepend it to the list
    ///
    /// Input is trimmed first; blank input is dropped without a remote
    /// call, matching the entry form's behavior.
    pub async fn add(&mut self, text: &str) -> Result<(), ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let input = CreateTodoInput {
            text: text.to_string(),
        };
        match self.api.create_todo(input).await {
            Ok(created) => {
                // The list is newest-first, so the fresh todo goes on top
                self.todos.insert(0, created);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("failed to create todo: {}", err);
                Err(err)
            }
        }
    }

    /// Set a todo's completion status, replacing the local element with the
    /// server's confirmed version
    pub async fn set_completed(&mut self, id: i32, completed: bool) -> Result<(), ClientError> {
        let input = UpdateTodoCompletionInput { id, completed };
        match self.api.update_todo_completion(input).await {
            Ok(updated) => {
                if let Some(slot) = self.todos.iter_mut().find(|t| t.id == id) {
                    *slot = updated;
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!("failed to update todo: {}", err);
                Err(err)
            }
        }
    }

    /// Delete a todo and drop it from the list
    pub async fn remove(&mut self, id: i32) -> Result<(), ClientError> {
        match self.api.delete_todo(DeleteTodoInput { id }).await {
            Ok(_) => {
                self.todos.retain(|t| t.id != id);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("failed to delete todo: {}", err);
                Err(err)
            }
        }
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    pub fn total_count(&self) -> usize {
        self.todos.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use todo_schema::DeleteTodoResult;

    /// In-memory stand-in for the server: same ordering and not-found
    /// behavior, no network.
    #[derive(Default)]
    struct FakeApi {
        todos: Mutex<Vec<Todo>>,
        next_id: AtomicI32,
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    impl FakeApi {
        fn seeded(texts: &[&str]) -> Self {
            let api = Self::default();
            {
                let mut todos = api.todos.lock().unwrap();
                for text in texts {
                    let id = api.next_id.fetch_add(1, Ordering::SeqCst) + 1;
                    let now = Utc::now();
                    todos.insert(
                        0,
                        Todo {
                            id,
                            text: text.to_string(),
                            completed: false,
                            created_at: now,
                            updated_at: now,
                        },
                    );
                }
            }
            api
        }

        fn fail_from_now_on(&self) {
            self.fail.store(true, Ordering::SeqCst);
        }

        fn check_fail(&self) -> Result<(), ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(ClientError::Server(500))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl TodoApi for FakeApi {
        async fn create_todo(&self, input: CreateTodoInput) -> Result<Todo, ClientError> {
            self.check_fail()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let now = Utc::now();
            let todo = Todo {
                id,
                text: input.text,
                completed: false,
                created_at: now,
                updated_at: now,
            };
            self.todos.lock().unwrap().insert(0, todo.clone());
            Ok(todo)
        }

        async fn get_todos(&self) -> Result<Vec<Todo>, ClientError> {
            self.check_fail()?;
            Ok(self.todos.lock().unwrap().clone())
        }

        async fn update_todo_completion(
            &self,
            input: UpdateTodoCompletionInput,
        ) -> Result<Todo, ClientError> {
            self.check_fail()?;
            let mut todos = self.todos.lock().unwrap();
            let todo = todos
                .iter_mut()
                .find(|t| t.id == input.id)
                .ok_or(ClientError::NotFound)?;
            todo.completed = input.completed;
            todo.updated_at = Utc::now();
            Ok(todo.clone())
        }

        async fn delete_todo(
            &self,
            input: DeleteTodoInput,
        ) -> Result<DeleteTodoResult, ClientError> {
            self.check_fail()?;
            let mut todos = self.todos.lock().unwrap();
            let before = todos.len();
            todos.retain(|t| t.id != input.id);
            if todos.len() == before {
                return Err(ClientError::NotFound);
            }
            Ok(DeleteTodoResult { success: true })
        }
    }

    #[tokio::test]
    async fn load_replaces_local_list() {
        let mut list = TodoList::new(FakeApi::seeded(&["one", "two"]));

        list.load().await.unwrap();

        let texts: Vec<&str> = list.todos().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "one"]);
    }

    #[tokio::test]
    async fn add_prepends_confirmed_todo() {
        let mut list = TodoList::new(FakeApi::default());

        list.add("Buy milk").await.unwrap();
        list.add("Walk dog").await.unwrap();

        let texts: Vec<&str> = list.todos().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Walk dog", "Buy milk"]);
        assert_ne!(list.todos()[0].id, list.todos()[1].id);
    }

    #[tokio::test]
    async fn add_trims_input_and_skips_blank() {
        let mut list = TodoList::new(FakeApi::default());

        list.add("   ").await.unwrap();
        assert_eq!(list.total_count(), 0);
        // Blank input never reaches the transport
        assert_eq!(list.api.calls.load(Ordering::SeqCst), 0);

        list.add("  padded  ").await.unwrap();
        assert_eq!(list.todos()[0].text, "padded");
    }

    #[tokio::test]
    async fn set_completed_replaces_element_in_place() {
        let mut list = TodoList::new(FakeApi::seeded(&["one", "two"]));
        list.load().await.unwrap();
        let id = list.todos()[1].id;

        list.set_completed(id, true).await.unwrap();

        // Position unchanged, flag confirmed
        assert_eq!(list.todos()[1].id, id);
        assert_eq!(list.todos()[1].completed, true);
        assert_eq!(list.todos()[0].completed, false);
        assert_eq!(list.completed_count(), 1);
        assert_eq!(list.total_count(), 2);
    }

    #[tokio::test]
    async fn remove_drops_only_the_deleted_id() {
        let mut list = TodoList::new(FakeApi::seeded(&["one", "two", "three"]));
        list.load().await.unwrap();
        let id = list.todos()[1].id;

        list.remove(id).await.unwrap();

        assert_eq!(list.total_count(), 2);
        assert!(list.todos().iter().all(|t| t.id != id));
    }

    #[tokio::test]
    async fn failed_calls_leave_state_unchanged() {
        let mut list = TodoList::new(FakeApi::seeded(&["keep me"]));
        list.load().await.unwrap();
        let before: Vec<Todo> = list.todos().to_vec();

        list.api.fail_from_now_on();

        assert!(list.add("new").await.is_err());
        assert!(list.set_completed(before[0].id, true).await.is_err());
        assert!(list.remove(before[0].id).await.is_err());
        assert!(list.load().await.is_err());

        assert_eq!(list.todos(), before.as_slice());
    }

    #[tokio::test]
    async fn remove_missing_id_surfaces_not_found() {
        let mut list = TodoList::new(FakeApi::seeded(&["one"]));
        list.load().await.unwrap();

        let err = list.remove(999).await.unwrap_err();

        assert!(matches!(err, ClientError::NotFound));
        assert_eq!(list.total_count(), 1);
    }
}
