//! Route table
//!
//! Wires the four todo procedures onto the router. The store is cloned into
//! each handler closure, which is how handlers receive their dependencies.

use crate::controllers;
use crate::routing::Router;
use crate::store::TodoStore;

pub fn router(store: TodoStore) -> Router {
    let index = store.clone();
    let create = store.clone();
    let update = store.clone();
    let destroy = store;

    Router::new()
        .get("/todos", move |req| {
            controllers::todo::index(index.clone(), req)
        })
        .post("/todos", move |req| {
            controllers::todo::store(create.clone(), req)
        })
        .put("/todos/{id}/completion", move |req| {
            controllers::todo::update_completion(update.clone(), req)
        })
        .delete("/todos/{id}", move |req| {
            controllers::todo::destroy(destroy.clone(), req)
        })
}
