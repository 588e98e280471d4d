pub mod app_config;
pub mod config;
pub mod products;
pub mod report;
pub mod search;
pub mod sink;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{ProductIdentifier, ProductRecord};
pub use report::{best_item, build_report, Report};
pub use search::{SearchFilters, SearchRequest};
pub use sink::{JsonFileSink, ReportSink};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid price filters: min {min} is greater than max {max}")]
    InvalidFilters { min: u32, max: u32 },

    #[error("search term must not be empty")]
    EmptySearchTerm,

    #[error("invalid product identifier \"{raw}\": expected a non-empty alphanumeric token")]
    InvalidIdentifier { raw: String },

    #[error("failed to write report to {path}: {source}")]
    ReportIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
