use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Site-level settings shared by every run. Per-run inputs (search term,
/// filters, output name) live in [`crate::SearchRequest`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Storefront root, e.g. `"https://www.amazon.co.uk/"`.
    pub base_url: String,
    /// Currency symbol as it appears in rendered prices, e.g. `"£"`.
    pub currency: String,
    /// Value of the `language` query parameter sent with product page visits.
    pub locale: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Upper bound on how long to wait for an element after a navigation.
    pub element_wait_ms: u64,
    pub poll_interval_ms: u64,
}
