use serde::Deserialize;
use todo_schema::{CreateTodoInput, DeleteTodoInput, DeleteTodoResult, UpdateTodoCompletionInput};

use crate::error::Error;
use crate::http::{validate, FormRequest, HttpResponse, Request, Response};
use crate::store::TodoStore;

/// GET /todos — every todo, newest first
pub async fn index(todos: TodoStore, _req: Request) -> Response {
    let list = todos.list_all().await?;
    let body = serde_json::to_value(&list).map_err(Error::from)?;
    Ok(HttpResponse::json(body))
}

/// POST /todos — create a todo from a validated `CreateTodoInput`
pub async fn store(todos: TodoStore, req: Request) -> Response {
    let input = CreateTodoInput::extract(req).await?;
    let todo = todos.insert(&input.text).await?;
    let body = serde_json::to_value(&todo).map_err(Error::from)?;
    Ok(HttpResponse::json(body).status(201))
}

/// Body shape for the completion update; the id rides in the path.
#[derive(Deserialize)]
struct CompletionBody {
    completed: bool,
}

/// PUT /todos/{id}/completion — set the completion flag
pub async fn update_completion(todos: TodoStore, req: Request) -> Response {
    let id = req.param_i32("id")?;
    let body: CompletionBody = req.json().await?;

    let input = UpdateTodoCompletionInput {
        id,
        completed: body.completed,
    };
    validate(&input)?;

    let todo = todos.update_completion(input.id, input.completed).await?;
    let body = serde_json::to_value(&todo).map_err(Error::from)?;
    Ok(HttpResponse::json(body))
}

/// DELETE /todos/{id} — remove a todo
///
/// A missing id surfaces as 404; it is never folded into a success body.
pub async fn destroy(todos: TodoStore, req: Request) -> Response {
    let input = DeleteTodoInput {
        id: req.param_i32("id")?,
    };
    validate(&input)?;

    todos.delete_by_id(input.id).await?;
    let body = serde_json::to_value(DeleteTodoResult { success: true }).map_err(Error::from)?;
    Ok(HttpResponse::json(body))
}
