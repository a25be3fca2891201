//! Request/response contract shared by every API call
//!
//! Each request carries its own bearer header. Anything other than a 2xx
//! status is a failure, and bodies are decoded case-insensitively.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::LibraryError;
use crate::data::decode_case_insensitive;

/// Attaches the bearer token to this request, sends it and checks the status
pub(crate) async fn send(request: RequestBuilder, token: &str) -> Result<Response, LibraryError> {
    let response = request.bearer_auth(token).send().await?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    tracing::warn!(url = %response.url(), %status, "request rejected");

    // Body is diagnostic only, so a failed read just drops it
    let body = response.text().await.ok().filter(|text| !text.is_empty());
    Err(LibraryError::HttpStatus { status, body })
}

/// Reads the whole body and decodes it into `T`
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, LibraryError> {
    let bytes = response.bytes().await?;
    Ok(decode_case_insensitive(&bytes)?)
}
