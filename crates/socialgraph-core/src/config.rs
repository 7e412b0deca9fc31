//! Configuration management for the social graph service.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`SOCIALGRAPH_` prefix, `__` between sections)
//! 2. Config file (`socialgraph.toml` by default)
//! 3. Defaults

use serde::Deserialize;

use crate::error::{Result, SocialError};

/// Top-level service configuration, passed explicitly to every component
/// that needs it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub neo4j: Neo4jSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub auth: AuthSettings,
}

/// `[neo4j]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jSettings {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_password")]
    pub password: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// `[auth]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSettings {
    /// Shared secret required on every write request.
    #[serde(default)]
    pub api_token: String,
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "socialgraph-dev".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: default_password(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the optional file `file_prefix` (any format
    /// the `config` crate recognises by extension) and the environment.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("SOCIALGRAPH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = cfg.try_deserialize()?;
        tracing::debug!(file = file_prefix, uri = %config.neo4j.uri, "Configuration loaded");
        Ok(config)
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.auth.api_token.is_empty() {
            return Err(SocialError::Config(
                "auth.api_token must be set (SOCIALGRAPH_AUTH__API_TOKEN)".to_string(),
            ));
        }
        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(SocialError::Config(format!(
                "server.bind is not a socket address: {}",
                self.server.bind
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(src: &str) -> ServiceConfig {
        config::Config::builder()
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j.max_connections, 16);
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert!(config.auth.api_token.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml(
            r#"
            [neo4j]
            uri = "bolt://graph:7687"

            [auth]
            api_token = "s3cret"
            "#,
        );
        assert_eq!(config.neo4j.uri, "bolt://graph:7687");
        assert_eq!(config.neo4j.user, "neo4j");
        assert_eq!(config.auth.api_token, "s3cret");
        assert_eq!(config.server.bind, "0.0.0.0:8000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_token() {
        let err = ServiceConfig::default().validate().unwrap_err();
        assert!(matches!(err, SocialError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_bad_bind() {
        let mut config = ServiceConfig::default();
        config.auth.api_token = "t".to_string();
        config.server.bind = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }
}
