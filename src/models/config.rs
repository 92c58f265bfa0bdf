//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::types::{PageLimit, TypeConstraintError};

#[derive(Clone, Debug, Deserialize, PartialEq)]
/// Settings of the dashboard client.
pub struct DashboardConfig {
    /// Base URL of the back-office API, without a trailing slash.
    pub backend_url: String,
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_page_limit() -> usize {
    crate::DEFAULT_PAGE_LIMIT
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl DashboardConfig {
    pub fn page_limit(&self) -> Result<PageLimit, TypeConstraintError> {
        PageLimit::new(self.page_limit)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reads `config/default`, `config/{app_env}` and `APP_*` variables, later
    /// sources overriding earlier ones. Both files are optional.
    #[cfg(feature = "client")]
    pub fn load(app_env: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("backend_url", "http://localhost:8000")?
            .set_default("page_limit", crate::DEFAULT_PAGE_LIMIT as u64)?
            .set_default("request_timeout_secs", default_request_timeout_secs())?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "backend_url": "https://api.example.com" }"#).unwrap();

        let limit = config.page_limit().unwrap();

        assert_eq!(limit.get(), crate::DEFAULT_PAGE_LIMIT);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn zero_page_limit_is_rejected() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "backend_url": "x", "page_limit": 0 }"#).unwrap();

        assert_eq!(
            config.page_limit(),
            Err(TypeConstraintError::NonPositiveLimit)
        );
    }
}
