pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod http;
pub mod migrations;
pub mod models;
pub mod routes;
pub mod routing;
pub mod server;
pub mod store;

pub use error::Error;
pub use http::{Request, Response};
pub use routing::Router;
pub use server::Server;
pub use store::TodoStore;
