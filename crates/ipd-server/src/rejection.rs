//! Rejection recovery
//!
//! Converts whatever warp rejected into a JSON error body, so clients never
//! see warp's plain-text defaults.

use crate::handlers::{json_with_status, ErrorBody};
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::reject::{LengthRequired, MethodNotAllowed, PayloadTooLarge, UnsupportedMediaType};
use warp::reply::Response;
use warp::Rejection;

/// Map a rejection to status + message
#[must_use]
pub fn classify(err: &Rejection) -> (StatusCode, &'static str) {
    if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Endpoint not found")
    } else if err.find::<MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid query string")
    } else if err.find::<warp::filters::body::BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid form body")
    } else if err.find::<PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if err.find::<UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected a form-encoded body")
    } else if err.find::<LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

/// Recover handler installed on the route tree
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = classify(&err);
    if status.is_server_error() {
        tracing::error!(?err, "unhandled rejection");
    } else {
        tracing::debug!(?err, %status, "request rejected");
    }
    Ok(json_with_status(&ErrorBody::new(message), status))
}
