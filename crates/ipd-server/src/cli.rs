//! Command-line interface
//!
//! Flags override values from `--config`, which override the defaults.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use ipd_core::history::MAX_MONTHS;
use ipd_core::{DashboardConfig, HistoryModel, PredictionModel};
use std::net::IpAddr;
use std::path::PathBuf;

/// Build the argument parser
#[must_use]
pub fn command() -> Command {
    Command::new("ipd-server")
        .version(ipd_core::VERSION)
        .about("Infrastructure Prediction Dashboard (mock predictions)")
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_parser(value_parser!(IpAddr))
                .help("Bind address [default: 0.0.0.0]"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_parser(value_parser!(u16))
                .help("Bind port [default: 5000]"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .help("Random seed for reproducible responses"),
        )
        .arg(
            Arg::new("months")
                .long("months")
                .value_parser(value_parser!(u32).range(1..=i64::from(MAX_MONTHS)))
                .help("Months of history served by default [default: 24]"),
        )
        .arg(
            Arg::new("prediction-model")
                .long("prediction-model")
                .value_parser(["trend", "scaled"])
                .help("Mock prediction formula [default: trend]"),
        )
        .arg(
            Arg::new("history-model")
                .long("history-model")
                .value_parser(["seasonal", "uniform"])
                .help("Synthetic history formula [default: seasonal]"),
        )
        .arg(
            Arg::new("model-path")
                .long("model-path")
                .value_parser(value_parser!(PathBuf))
                .help("Location of a model artifact"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
}

/// Resolve the effective configuration
///
/// # Errors
/// Config file unreadable or invalid, or the merged result fails validation.
pub fn load_config(matches: &ArgMatches) -> anyhow::Result<DashboardConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DashboardConfig::default(),
    };

    if let Some(host) = matches.get_one::<IpAddr>("host") {
        config = config.with_host(*host);
    }
    if let Some(port) = matches.get_one::<u16>("port") {
        config = config.with_port(*port);
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(*seed);
    }
    if let Some(months) = matches.get_one::<u32>("months") {
        config = config.with_history_months(*months);
    }
    if let Some(model) = matches.get_one::<String>("prediction-model") {
        config = config.with_prediction_model(match model.as_str() {
            "scaled" => PredictionModel::Scaled,
            _ => PredictionModel::Trend,
        });
    }
    if let Some(model) = matches.get_one::<String>("history-model") {
        config = config.with_history_model(match model.as_str() {
            "uniform" => HistoryModel::Uniform,
            _ => HistoryModel::Seasonal,
        });
    }
    if let Some(path) = matches.get_one::<PathBuf>("model-path") {
        config = config.with_model_path(path.clone());
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}
