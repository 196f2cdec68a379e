//! Body parsing utilities for HTTP requests

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Collect the full body from an Incoming stream
pub async fn collect_body(body: Incoming) -> Result<Bytes, Error> {
    body.collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| Error::internal(format!("Failed to read request body: {}", e)))
}

/// Parse bytes as JSON into the target type
///
/// A body that is not valid JSON for the target type is the caller's
/// mistake, so this maps to 400 rather than 500.
pub fn parse_json<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, Error> {
    serde_json::from_slice(bytes)
        .map_err(|e| Error::bad_request(format!("Failed to parse JSON body: {}", e)))
}
