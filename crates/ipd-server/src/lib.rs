//! IPD Server - HTTP surface for the Infrastructure Prediction Dashboard
//!
//! | Method | Path                  | Reply                                    |
//! |--------|-----------------------|------------------------------------------|
//! | GET    | `/`                   | dashboard page                           |
//! | POST   | `/predict`            | predictions + confidence bands           |
//! | GET    | `/historical_data`    | `{plot, data}`                           |
//! | GET    | `/model_info`         | static model description                 |
//! | GET    | `/feature_importance` | mock importance per feature              |
//! | GET    | `/health`             | liveness                                 |
//!
//! Unknown paths answer 404 and wrong methods 405, both as `{"error": ...}`.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cli;
pub mod handlers;
pub mod rejection;
pub mod routes;
pub mod telemetry;

pub use routes::routes;
