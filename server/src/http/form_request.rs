//! Validated request extraction
//!
//! Provides the `FormRequest` trait: parse the JSON body into a typed input
//! and run its `validator` constraints before the handler touches anything
//! else. Invalid input never reaches the store.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::Request;
use crate::error::{Error, ValidationErrors};

/// Run a value's `validator` constraints, mapping failures to `Error`.
///
/// Used directly when an input is assembled from route params plus body
/// instead of deserialized in one piece.
pub fn validate<T: Validate>(value: &T) -> Result<(), Error> {
    value
        .validate()
        .map_err(|errors| Error::Validation(ValidationErrors::from_validator(errors)))
}

/// Trait for validated JSON request data
///
/// Blanket-implemented for every `Deserialize + Validate` type, so the
/// shared schema inputs can be extracted with `CreateTodoInput::extract(req)`.
#[async_trait]
pub trait FormRequest: Sized + DeserializeOwned + Validate + Send {
    /// Parse the request body and validate the result
    ///
    /// Returns a 400-class error on a malformed body and a 422 validation
    /// error when constraints fail.
    async fn extract(req: Request) -> Result<Self, Error> {
        let data: Self = req.json().await?;
        validate(&data)?;
        Ok(data)
    }
}

#[async_trait]
impl<T: DeserializeOwned + Validate + Send> FormRequest for T {}
