use std::time::Duration;

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

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Origin of the storefront API, without a trailing slash.
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    /// Per-request timeout. `None` means requests may wait indefinitely.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
    /// Period between order-list refreshes while the admin dashboard is mounted.
    pub poll_interval: Duration,
    /// How long a checkout confirmation stays visible.
    pub confirmation_ttl: Duration,
}
