//! Client configuration.
//!
//! The client is always constructed from an explicit [`ClientConfig`] and
//! passed down as a dependency. Nothing in this crate reads credentials at
//! load time; a bad key surfaces as a reportable error from
//! [`crate::LinearClient::validate`], never as a startup crash.

use crate::error::ClientError;

/// Default GraphQL endpoint for the hosted Linear API.
pub const DEFAULT_ENDPOINT: &str = "https://api.linear.app/graphql";

/// Default number of items requested per connection page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// The server rejects `first` arguments above this.
const MAX_PAGE_SIZE: usize = 250;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub endpoint: String,
    pub page_size: usize,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Read `LINEAR_API_KEY` (required) and `LINEAR_API_ENDPOINT` (optional)
    /// from the environment.
    pub fn from_env() -> Result<Self, ClientError> {
        let api_key = std::env::var("LINEAR_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ClientError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        if let Ok(endpoint) = std::env::var("LINEAR_API_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint;
            }
        }
        Ok(config)
    }

    /// Builder: override the GraphQL endpoint (used by tests and proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Builder: set the page size, clamped to the server's accepted range.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let config = ClientConfig::new("lin_api_abc");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_size_is_clamped() {
        let config = ClientConfig::new("k").with_page_size(0);
        assert_eq!(config.page_size, 1);
        let config = ClientConfig::new("k").with_page_size(10_000);
        assert_eq!(config.page_size, 250);
    }

    #[test]
    fn with_endpoint_overrides() {
        let config = ClientConfig::new("k").with_endpoint("http://localhost:1234/graphql");
        assert_eq!(config.endpoint, "http://localhost:1234/graphql");
    }
}
