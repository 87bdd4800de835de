//! Request handlers
//!
//! Each handler turns a service call into a JSON reply. Handlers never
//! reject: failures become JSON error bodies with the matching status.

use ipd_core::{DashboardError, DashboardService, PredictionInput, PredictionOutput};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{self, Reply, Response};

/// Dashboard page
pub const INDEX_HTML: &str = include_str!("../static/index.html");

/// Success body for `POST /predict`
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(flatten)]
    pub output: PredictionOutput,
    pub input_data: PredictionInput,
}

/// Failure body for `POST /predict`
#[derive(Debug, Serialize)]
pub struct PredictFailure {
    pub success: bool,
    pub error: String,
}

/// Generic error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Query string for `GET /historical_data`
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub months: Option<u32>,
}

/// JSON reply with an explicit status
pub fn json_with_status<T: Serialize>(body: &T, status: StatusCode) -> Response {
    reply::with_status(reply::json(body), status).into_response()
}

/// `GET /`
pub async fn index() -> Result<impl Reply, Infallible> {
    Ok(reply::html(INDEX_HTML))
}

/// `POST /predict`
pub async fn predict(
    form: HashMap<String, String>,
    service: Arc<DashboardService>,
) -> Result<Response, Infallible> {
    let input = PredictionInput::from_form(&form);
    let output = service.predict(&input);

    match predict_body(output, input) {
        Ok(body) => Ok(json_with_status(&body, StatusCode::OK)),
        Err(err) => Ok(predict_failure(&err)),
    }
}

fn predict_body(
    output: PredictionOutput,
    input: PredictionInput,
) -> Result<serde_json::Value, DashboardError> {
    let body = serde_json::to_value(PredictResponse {
        success: true,
        output,
        input_data: input,
    })?;
    Ok(body)
}

/// `{success: false, error}` with status 500
pub fn predict_failure(err: &DashboardError) -> Response {
    tracing::error!(error = %err, "prediction failed");
    json_with_status(
        &PredictFailure {
            success: false,
            error: err.to_string(),
        },
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}

/// `GET /historical_data`
pub async fn historical_data(
    query: HistoryQuery,
    service: Arc<DashboardService>,
) -> Result<Response, Infallible> {
    match service.historical_data(query.months) {
        Ok(data) => Ok(json_with_status(&data, StatusCode::OK)),
        Err(err) => Ok(error_reply(&err)),
    }
}

/// `{error}` with the status the error maps to
pub fn error_reply(err: &DashboardError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if err.is_client_error() {
        tracing::debug!(error = %err, "rejected request");
    } else {
        tracing::error!(error = %err, "request failed");
    }
    json_with_status(&ErrorBody::new(err.to_string()), status)
}

/// `GET /model_info`
pub async fn model_info(service: Arc<DashboardService>) -> Result<impl Reply, Infallible> {
    Ok(reply::json(&service.model_info()))
}

/// `GET /feature_importance`
pub async fn feature_importance(service: Arc<DashboardService>) -> Result<impl Reply, Infallible> {
    Ok(reply::json(&service.feature_importance()))
}

/// `GET /health`
pub async fn health(service: Arc<DashboardService>) -> Result<impl Reply, Infallible> {
    Ok(reply::json(&service.health()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialization_error() -> DashboardError {
        serde_json::from_str::<u32>("nope").unwrap_err().into()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = warp::hyper::body::to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn predict_failure_shape() {
        let err = serialization_error();
        let expected = serde_json::json!({ "success": false, "error": err.to_string() });

        let response = predict_failure(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, expected);
    }

    #[tokio::test]
    async fn error_reply_uses_error_status() {
        let bad = DashboardError::invalid_parameter("months", "too many");
        let response = error_reply(&bad);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "invalid parameter `months`: too many" })
        );

        assert_eq!(
            error_reply(&serialization_error()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn index_page_is_bundled() {
        assert!(INDEX_HTML.contains("/predict"));
        assert!(INDEX_HTML.contains("/historical_data"));
    }
}
