use serde::Deserialize;
use std::path::Path;

/// Base URL of the news API when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Largest `limit` the news API accepts on `/fetch-articles/`.
pub const MAX_ARTICLE_LIMIT: usize = 10;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Articles requested per category switch
    #[serde(default = "default_article_limit")]
    pub article_limit: usize,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Idle time in minutes before a visitor's browser state is dropped
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_article_limit() -> usize {
    5
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_session_ttl_minutes() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            article_limit: default_article_limit(),
            bind_address: default_bind_address(),
            session_ttl_minutes: default_session_ttl_minutes(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_base_url.trim().is_empty() {
            anyhow::bail!("api_base_url must not be empty");
        }
        if self.article_limit == 0 || self.article_limit > MAX_ARTICLE_LIMIT {
            anyhow::bail!(
                "article_limit must be between 1 and {}, got {}",
                MAX_ARTICLE_LIMIT,
                self.article_limit
            );
        }
        if self.session_ttl_minutes == 0 {
            anyhow::bail!("session_ttl_minutes must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.article_limit, 5);
        assert_eq!(config.bind_address, "0.0.0.0:3000");
        assert_eq!(config.session_ttl_minutes, 30);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
            api_base_url = "https://news.example.com/api"
            article_limit = 8
            bind_address = "127.0.0.1:8080"
            session_ttl_minutes = 10
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.api_base_url, "https://news.example.com/api");
        assert_eq!(config.article_limit, 8);
        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.session_ttl_minutes, 10);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.article_limit, 5);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = Config::from_str("article_limit = 3").unwrap();
        assert_eq!(config.article_limit, 3);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.session_ttl_minutes, 30);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/path/config.toml").unwrap();
        assert_eq!(config.article_limit, 5);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let content = "this is not valid toml {{{";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        assert!(Config::load(temp_file.path()).is_err());
        assert!(Config::load_or_default(temp_file.path()).is_err());
    }

    #[test]
    fn test_wrong_field_type() {
        let result = Config::from_str(r#"article_limit = "five""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_article_limit_bounds() {
        let mut config = Config::default();

        config.article_limit = 0;
        assert!(config.validate().is_err());

        config.article_limit = MAX_ARTICLE_LIMIT + 1;
        assert!(config.validate().is_err());

        config.article_limit = MAX_ARTICLE_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_base_url() {
        let config = Config {
            api_base_url: "   ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = Config {
            session_ttl_minutes: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
