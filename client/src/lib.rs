//! Client side of the todo service: a typed API client plus the list state
//! it feeds. Rendering is someone else's problem; this crate owns fetching
//! and keeping the local list consistent with confirmed server state.

pub mod api;
pub mod state;

pub use api::{ApiClient, ClientError, TodoApi};
pub use state::TodoList;
