//! Configuration loading from environment.

use std::env;

use creditcard_repo::{RepoConfig, SerializationOptions};

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub include_type_metadata: bool,
    /// OTLP collector; tracing export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT must be a port number: {}", e))?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let database_name = lookup("DATABASE_NAME").unwrap_or_else(|| "creditcard".to_string());

        let include_type_metadata = match lookup("STORE_TYPE_METADATA") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("STORE_TYPE_METADATA must be true or false"))?,
            None => false,
        };

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|s| !s.is_empty());

        Ok(Self {
            port,
            database_url,
            database_name,
            include_type_metadata,
            otlp_endpoint,
        })
    }

    /// Store connection settings.
    pub fn repo(&self) -> RepoConfig {
        RepoConfig {
            database_url: self.database_url.clone(),
            database_name: self.database_name.clone(),
            serialization: SerializationOptions {
                include_type_metadata: self.include_type_metadata,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "mongodb://localhost:27017")]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.database_name, "creditcard");
        assert!(!config.include_type_metadata);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn test_database_url_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "sqlite://cards.db"),
            ("PORT", "8080"),
            ("DATABASE_NAME", "cards"),
            ("STORE_TYPE_METADATA", "true"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        let repo = config.repo();
        assert_eq!(repo.database_name, "cards");
        assert!(repo.serialization.include_type_metadata);
        assert_eq!(
            config.otlp_endpoint.as_deref(),
            Some("http://localhost:4317")
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(load(&[("DATABASE_URL", "x"), ("PORT", "http")]).is_err());
        assert!(load(&[("DATABASE_URL", "x"), ("STORE_TYPE_METADATA", "yes")]).is_err());
    }
}
