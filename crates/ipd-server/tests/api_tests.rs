//! End-to-end tests for the HTTP surface, driven through `warp::test`.

use ipd_core::{HistoryModel, Metric, PredictionModel};
use ipd_server::routes;
use ipd_test_utils::{
    assert_predictions_bracketed, form_body, parse_json, seeded_config, setup_service,
    setup_service_with,
};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use warp::http::StatusCode;

async fn post_predict(body: &str) -> (StatusCode, serde_json::Value) {
    let api = routes(setup_service());
    let resp = warp::test::request()
        .method("POST")
        .path("/predict")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(body.to_string())
        .reply(&api)
        .await;
    (resp.status(), parse_json(resp.body()))
}

async fn get(api_config: ipd_core::DashboardConfig, path: &str) -> (StatusCode, serde_json::Value) {
    let api = routes(setup_service_with(api_config));
    let resp = warp::test::request().method("GET").path(path).reply(&api).await;
    (resp.status(), parse_json(resp.body()))
}

#[tokio::test]
async fn predict_returns_bracketed_predictions() {
    let (status, body) = post_predict(&form_body(&[("road_work_sanctioned", "150")])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_predictions_bracketed(&body);
    assert_eq!(body["model_version"], "1.0.0");
    assert!(body["prediction_timestamp"].is_string());
    assert_eq!(body["input_data"]["NO_OF_ROAD_WORK_SANCTIONED"], 150.0);
    assert_eq!(body["input_data"]["NO_OF_BRIDGES_SANCTIONED"], 0.0);
}

#[tokio::test]
async fn predict_coerces_malformed_numbers() {
    let (status, body) = post_predict(&form_body(&[
        ("cost_sanctioned", "notanumber"),
        ("expenditure", "-12"),
    ]))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["input_data"]["COST_OF_WORKS_SANCTIONED"], 0.0);
    assert_eq!(body["input_data"]["EXPENDITURE_OCCURED"], 0.0);
    assert_predictions_bracketed(&body);
}

#[tokio::test]
async fn predict_with_empty_form_defaults_every_input() {
    let (status, body) = post_predict("").await;

    assert_eq!(status, StatusCode::OK);
    let input = body["input_data"].as_object().unwrap();
    assert_eq!(input.len(), 7);
    assert!(input.values().all(|v| v.as_f64() == Some(0.0)));
}

#[tokio::test]
async fn predict_without_body_uses_defaults() {
    let api = routes(setup_service());
    let resp = warp::test::request().method("POST").path("/predict").reply(&api).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = parse_json(resp.body());
    assert_eq!(body["success"], true);
    let input = body["input_data"].as_object().unwrap();
    assert_eq!(input.len(), 7);
    assert!(input.values().all(|v| v.as_f64() == Some(0.0)));
    assert_predictions_bracketed(&body);
}

#[tokio::test]
async fn predict_rejects_oversized_body() {
    let api = routes(setup_service());
    let resp = warp::test::request()
        .method("POST")
        .path("/predict")
        .body(format!("road_work_sanctioned={}", "9".repeat(20 * 1024)))
        .reply(&api)
        .await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(parse_json(resp.body())["error"], "Request body too large");
}

#[tokio::test]
async fn predict_caps_huge_inputs() {
    let (status, body) = post_predict(&form_body(&[("road_work_sanctioned", "1e300")])).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input_data"]["NO_OF_ROAD_WORK_SANCTIONED"], 1.0e12);
    let value = body["predictions"]["NO_OF_ROAD_WORK_SANCTIONED"].as_u64().unwrap();
    assert!(value < 200_000_000_000, "{value}");
    assert_predictions_bracketed(&body);
}

#[tokio::test]
async fn predict_is_reproducible_for_a_seed() {
    let form = form_body(&[("road_work_sanctioned", "150"), ("bridges_sanctioned", "40")]);
    let (_, first) = post_predict(&form).await;
    let (_, second) = post_predict(&form).await;
    assert_eq!(first["predictions"], second["predictions"]);
}

#[tokio::test]
async fn predict_scaled_variant_applies_floors() {
    let api = routes(setup_service_with(
        seeded_config(1).with_prediction_model(PredictionModel::Scaled),
    ));
    let resp = warp::test::request()
        .method("POST")
        .path("/predict")
        .body(form_body(&[("road_work_sanctioned", "0"), ("bridges_sanctioned", "0")]))
        .reply(&api)
        .await;

    let body = parse_json(resp.body());
    assert_eq!(body["predictions"]["NO_OF_ROAD_WORK_SANCTIONED"], 50);
    assert_eq!(body["predictions"]["NO_OF_BRIDGES_BALANCE"], 0);
    assert_predictions_bracketed(&body);
}

#[tokio::test]
async fn predict_rejects_get() {
    let (status, body) = get(seeded_config(0), "/predict").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let (status, body) = get(seeded_config(0), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "error": "Endpoint not found" }));
}

#[tokio::test]
async fn historical_data_serves_24_distinct_months() {
    let (status, body) = get(seeded_config(7), "/historical_data").await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 24);
    let dates: HashSet<&str> = data.iter().map(|r| &r["date"].as_str().unwrap()[..7]).collect();
    assert_eq!(dates.len(), 24);
    assert_eq!(data[0]["date"], "2023-01-01");

    for record in data {
        for metric in Metric::ALL {
            assert!(record[metric.as_str()].is_number());
        }
    }

    let plot: serde_json::Value = serde_json::from_str(body["plot"].as_str().unwrap()).unwrap();
    assert_eq!(plot["data"].as_array().unwrap().len(), 5);
    assert_eq!(plot["data"][0]["x"].as_array().unwrap().len(), 24);
}

#[tokio::test]
async fn historical_data_accepts_months() {
    let (status, body) = get(seeded_config(7), "/historical_data?months=6").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn historical_data_rejects_bad_months() {
    let (status, body) = get(seeded_config(7), "/historical_data?months=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("months"));

    let (status, body) = get(seeded_config(7), "/historical_data?months=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid query string");
}

#[tokio::test]
async fn historical_data_misconfigured_length_is_500() {
    let (status, body) = get(seeded_config(1).with_history_months(0), "/historical_data").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("configuration error"));

    let (status, _) = get(seeded_config(1).with_history_months(0), "/historical_data?months=3").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn historical_data_uniform_variant_uses_month_ends() {
    let config = seeded_config(7).with_history_model(HistoryModel::Uniform);
    let (_, body) = get(config, "/historical_data").await;
    assert_eq!(body["data"][0]["date"], "2023-01-31");
    assert_eq!(body["data"][23]["date"], "2024-12-31");
}

#[tokio::test]
async fn model_info_describes_model() {
    let (status, body) = get(seeded_config(0), "/model_info").await;
    assert_eq!(status, StatusCode::OK);

    for key in ["model_type", "algorithm", "features", "target_variables"] {
        assert!(body.get(key).is_some(), "missing {key}");
    }
    assert_eq!(body["features"].as_array().unwrap().len(), 10);
    assert_eq!(body["target_variables"].as_array().unwrap().len(), 5);
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["using_mock_data"], true);

    let scaled = seeded_config(0).with_prediction_model(PredictionModel::Scaled);
    let (_, body) = get(scaled, "/model_info").await;
    assert_eq!(body["features"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn feature_importance_lists_scores() {
    let (status, body) = get(seeded_config(0), "/feature_importance").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_object().unwrap().len(), 6);
    assert_eq!(body["NO_OF_ROAD_WORK_SANCTIONED"], 0.25);
}

#[tokio::test]
async fn health_is_static_liveness() {
    let (status, body) = get(seeded_config(0), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["using_mock_data"], true);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn index_serves_dashboard_page() {
    let api = routes(setup_service());
    let resp = warp::test::request().method("GET").path("/").reply(&api).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    assert!(std::str::from_utf8(resp.body()).unwrap().contains("Infrastructure Prediction Dashboard"));
}
