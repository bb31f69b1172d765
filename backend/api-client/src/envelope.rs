//! Response envelope decoding and error classification.
//!
//! A response is classified into exactly one of:
//! 1. no response / unparsable body → generic `SERVER_ERROR`
//! 2. `{ "errors": [...] }` → the first listed error, verbatim; an error list
//!    that does not decode falls back to `SERVER_ERROR`
//! 3. `{ "data": ... }` → the payload decoded against the output type; a
//!    payload that does not decode is also `SERVER_ERROR`
//!
//! Implementation-level failures are logged with their location and never
//! surface to callers as anything but `SERVER_ERROR`.

use crate::error::{ApiError, EnvelopeError, ErrorCode, LocalizedText, TransportError};
use crate::transport::TransportResponse;

use log::{error, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

const ERRORS_KEY: &str = "errors";
const DATA_KEY: &str = "data";

/// One entry of the error list. The code may sit at the top level or under
/// `extensions`, depending on the server layer that produced it.
#[derive(Debug, Deserialize)]
struct WireError {
    message: LocalizedText,
    #[serde(default)]
    code: Option<ErrorCode>,
    #[serde(default)]
    extensions: Option<WireExtensions>,
}

#[derive(Debug, Deserialize)]
struct WireExtensions {
    #[serde(default)]
    code: Option<ErrorCode>,
}

/// Classify the outcome of a send into decoded data or an [`ApiError`].
pub fn decode_outcome<O: DeserializeOwned>(
    outcome: Result<TransportResponse, TransportError>,
) -> Result<O, ApiError> {
    match outcome {
        Ok(response) => decode_response(response),
        Err(failure) => {
            error!("Normalising transport failure to SERVER_ERROR: {failure}");
            Err(ApiError::server_error())
        }
    }
}

/// Classify a received response into decoded data or an [`ApiError`].
pub fn decode_response<O: DeserializeOwned>(response: TransportResponse) -> Result<O, ApiError> {
    classify(response).unwrap_or_else(|failure| {
        warn!(
            "Normalising {} failure to SERVER_ERROR: {failure}",
            failure.category()
        );
        Err(ApiError::server_error())
    })
}

fn classify<O: DeserializeOwned>(
    response: TransportResponse,
) -> Result<Result<O, ApiError>, EnvelopeError> {
    let status = response.status;

    let Some(Value::Object(mut fields)) = response.body else {
        return Err(EnvelopeError::malformed_body(status, "body is not a JSON object"));
    };

    if let Some(errors) = fields.remove(ERRORS_KEY).filter(|v| !v.is_null()) {
        return decode_error_list(errors).map(Err);
    }

    if !status.is_success() {
        return Err(EnvelopeError::malformed_body(
            status,
            "non-success status without an error list",
        ));
    }

    let Some(data) = fields.remove(DATA_KEY) else {
        return Err(EnvelopeError::malformed_body(status, "neither data nor errors present"));
    };

    serde_json::from_value(data)
        .map(Ok)
        .map_err(|e| EnvelopeError::schema(&e))
}

/// The server reports one actionable error first; the rest are dropped.
fn decode_error_list(errors: Value) -> Result<ApiError, EnvelopeError> {
    let errors: Vec<WireError> =
        serde_json::from_value(errors).map_err(|e| EnvelopeError::error_list(e.to_string()))?;

    let Some(first) = errors.into_iter().next() else {
        return Err(EnvelopeError::error_list("error list is empty"));
    };

    let code = first
        .extensions
        .and_then(|extensions| extensions.code)
        .or(first.code)
        .ok_or_else(|| EnvelopeError::error_list("first error carries no code"))?;

    Ok(ApiError::new(code, first.message))
}
