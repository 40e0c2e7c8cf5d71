//! Optional `linops.yaml` config file.
//!
//! Precedence everywhere in the CLI: command-line flags, then environment
//! variables, then this file, then built-in defaults. The API key itself only
//! ever comes from the environment.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileConfig {
    /// GraphQL endpoint override (below `LINEAR_API_ENDPOINT`).
    pub endpoint: Option<String>,
    /// Connection page size.
    pub page_size: Option<usize>,
    /// Bound on simultaneous relation fetches.
    pub concurrency: Option<usize>,
    #[serde(default)]
    pub webhook: WebhookConfig,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Name of the env var holding the signing secret.
    pub secret_env: Option<String>,
    /// Downstream URL deliveries are relayed to.
    pub forward_url: Option<String>,
}

impl FileConfig {
    /// Load from `explicit`, falling back to `./linops.yaml` when present,
    /// else defaults. A missing explicit path is an error; a missing default
    /// path is not.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from("linops.yaml");
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Assemble the client configuration: env first, file values filling the
    /// gaps. Fails when `LINEAR_API_KEY` is unset.
    pub fn client_config(&self) -> anyhow::Result<linear_client::ClientConfig> {
        let mut config = linear_client::ClientConfig::from_env()?;
        if std::env::var("LINEAR_API_ENDPOINT").is_err() {
            if let Some(endpoint) = &self.endpoint {
                config = config.with_endpoint(endpoint.as_str());
            }
        }
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size);
        }
        Ok(config)
    }

    /// Effective concurrency: flag, then file, then the core default.
    pub fn concurrency(&self, flag: Option<usize>) -> usize {
        flag.or(self.concurrency)
            .unwrap_or(linops_core::DEFAULT_CONCURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "endpoint: http://localhost:4000/graphql\npage_size: 25\nconcurrency: 4\nwebhook:\n  secret_env: MY_SECRET\n  forward_url: https://example.com/hook"
        )
        .unwrap();
        let config = FileConfig::load(Some(file.path())).unwrap();
        assert_eq!(
            config.endpoint.as_deref(),
            Some("http://localhost:4000/graphql")
        );
        assert_eq!(config.page_size, Some(25));
        assert_eq!(config.concurrency, Some(4));
        assert_eq!(config.webhook.secret_env.as_deref(), Some("MY_SECRET"));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        assert!(FileConfig::load(Some(Path::new("/nonexistent/linops.yaml"))).is_err());
    }

    #[test]
    fn concurrency_precedence_is_flag_file_default() {
        let config = FileConfig {
            concurrency: Some(4),
            ..Default::default()
        };
        assert_eq!(config.concurrency(Some(2)), 2);
        assert_eq!(config.concurrency(None), 4);
        assert_eq!(
            FileConfig::default().concurrency(None),
            linops_core::DEFAULT_CONCURRENCY
        );
    }
}
