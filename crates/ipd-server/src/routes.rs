//! Route tree
//!
//! Every route matches its path before its method, so an unknown path is a
//! 404 and a known path with the wrong method is a 405.

use crate::handlers::{self, HistoryQuery};
use crate::rejection;
use ipd_core::DashboardService;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

/// Largest accepted `/predict` form body
pub const MAX_FORM_BYTES: u64 = 16 * 1024;

/// Full API with JSON error recovery and request tracing
pub fn routes(
    service: Arc<DashboardService>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    index()
        .or(predict(service.clone()))
        .or(historical_data(service.clone()))
        .or(model_info(service.clone()))
        .or(feature_importance(service.clone()))
        .or(health(service))
        .recover(rejection::handle_rejection)
        .with(warp::trace::request())
}

/// `GET /`
pub fn index() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path::end().and(warp::get()).and_then(handlers::index)
}

/// `POST /predict` with a form-encoded body
pub fn predict(
    service: Arc<DashboardService>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("predict")
        .and(warp::post())
        .and(form_body())
        .and(with_service(service))
        .and_then(handlers::predict)
}

/// `GET /historical_data[?months=N]`
pub fn historical_data(
    service: Arc<DashboardService>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("historical_data")
        .and(warp::get())
        .and(warp::query::<HistoryQuery>())
        .and(with_service(service))
        .and_then(handlers::historical_data)
}

/// `GET /model_info`
pub fn model_info(
    service: Arc<DashboardService>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("model_info")
        .and(warp::get())
        .and(with_service(service))
        .and_then(handlers::model_info)
}

/// `GET /feature_importance`
pub fn feature_importance(
    service: Arc<DashboardService>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("feature_importance")
        .and(warp::get())
        .and(with_service(service))
        .and_then(handlers::feature_importance)
}

/// `GET /health`
pub fn health(
    service: Arc<DashboardService>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("health")
        .and(warp::get())
        .and(with_service(service))
        .and_then(handlers::health)
}

/// Form fields of a bounded body; a request with no body reads as an empty form
fn form_body() -> impl Filter<Extract = (HashMap<String, String>,), Error = Rejection> + Clone {
    let sized = warp::body::content_length_limit(MAX_FORM_BYTES)
        .and(warp::body::form::<HashMap<String, String>>());
    let bodiless = warp::header::optional::<u64>("content-length")
        .and(warp::header::optional::<String>("transfer-encoding"))
        .and_then(|length: Option<u64>, encoding: Option<String>| async move {
            match (length, encoding) {
                (None, None) => Ok(HashMap::<String, String>::new()),
                _ => Err(warp::reject::not_found()),
            }
        });
    sized.or(bodiless).unify()
}

fn with_service(
    service: Arc<DashboardService>,
) -> impl Filter<Extract = (Arc<DashboardService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}
