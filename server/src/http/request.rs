use std::collections::HashMap;

use serde::de::DeserializeOwned;

use super::body::{collect_body, parse_json};
use crate::error::Error;

/// HTTP request wrapper providing typed access to route params and body
pub struct Request {
    inner: hyper::Request<hyper::body::Incoming>,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new(inner: hyper::Request<hyper::body::Incoming>) -> Self {
        Self {
            inner,
            params: HashMap::new(),
        }
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Get the request method
    pub fn method(&self) -> &hyper::Method {
        self.inner.method()
    }

    /// Get the request path
    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    /// Get a route parameter by name (e.g., /todos/{id})
    ///
    /// Returns Err on a missing parameter, enabling use of the `?` operator.
    pub fn param(&self, name: &str) -> Result<&str, Error> {
        self.params
            .get(name)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::param(name))
    }

    /// Get a route parameter parsed as an i32
    pub fn param_i32(&self, name: &str) -> Result<i32, Error> {
        let raw = self.param(name)?;
        raw.parse()
            .map_err(|_| Error::param_parse(raw.to_string(), "i32"))
    }

    /// Parse the request body as JSON
    ///
    /// Consumes the request since the body can only be read once.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, Error> {
        let bytes = collect_body(self.inner.into_body()).await?;
        parse_json(&bytes)
    }
}
