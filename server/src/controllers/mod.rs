//! Request handlers
//!
//! Each handler is a thin orchestration step: validate input, call the
//! store, shape the response. Failures propagate with `?` and are converted
//! at the response boundary.

pub mod todo;
