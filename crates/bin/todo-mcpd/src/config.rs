use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use todo_core::store::NotionStoreConfig;
use todo_store::schema::{NOTION_API_BASE_URL, NOTION_API_VERSION};

#[derive(Parser, Debug)]
#[command(name = "todo-mcpd", version, about = "Notion todo MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    notion_api_key: Option<String>,

    #[arg(long, env = "NOTION_DATABASE_ID")]
    notion_database_id: Option<String>,

    #[arg(long, env = "NOTION_BASE_URL", default_value = NOTION_API_BASE_URL)]
    notion_base_url: String,

    #[arg(long, env = "NOTION_VERSION", default_value = NOTION_API_VERSION)]
    notion_version: String,

    /// Per-request timeout for Notion calls; unset or 0 keeps the client default.
    #[arg(long, env = "TODO_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Serve streamable HTTP on this address instead of stdio.
    #[arg(long, env = "TODO_HTTP_ADDR")]
    http_addr: Option<SocketAddr>,

    #[arg(
        long,
        env = "TODO_HTTP_STATELESS",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http_stateless: bool,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
pub struct TodoConfig {
    pub api_key: String,
    pub database_id: String,
    pub base_url: String,
    pub api_version: String,
    pub request_timeout: Option<Duration>,
    pub http_addr: Option<SocketAddr>,
    pub http_stateless: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl TodoConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    pub fn store_config(&self) -> NotionStoreConfig {
        NotionStoreConfig::new(self.api_key.clone(), self.database_id.clone())
            .with_base_url(self.base_url.clone())
            .with_api_version(self.api_version.clone())
            .with_request_timeout(self.request_timeout)
    }
}

impl TryFrom<CliArgs> for TodoConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let api_key = required(args.notion_api_key, "NOTION_API_KEY")?;
        let database_id = required(args.notion_database_id, "NOTION_DATABASE_ID")?;

        let base_url = args.notion_base_url.trim().to_string();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidSetting {
                name: "NOTION_BASE_URL",
                value: args.notion_base_url,
            });
        }

        if args.notion_version.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "NOTION_VERSION",
                value: args.notion_version,
            });
        }

        let request_timeout = args
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            api_key,
            database_id,
            base_url,
            api_version: args.notion_version.trim().to_string(),
            request_timeout,
            http_addr: args.http_addr,
            http_stateless: args.http_stateless,
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingSetting(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            notion_api_key: Some("secret_abc".to_string()),
            notion_database_id: Some("db-123".to_string()),
            notion_base_url: NOTION_API_BASE_URL.to_string(),
            notion_version: NOTION_API_VERSION.to_string(),
            request_timeout_secs: None,
            http_addr: None,
            http_stateless: false,
        }
    }

    #[test]
    fn parses_minimal_settings() {
        let config = TodoConfig::try_from(base_args()).expect("config should parse");

        assert_eq!(config.api_key, "secret_abc");
        assert_eq!(config.database_id, "db-123");
        assert_eq!(config.base_url, NOTION_API_BASE_URL);
        assert!(config.request_timeout.is_none());
        assert!(config.http_addr.is_none());
    }

    #[test]
    fn missing_credentials_are_fatal() {
        let mut args = base_args();
        args.notion_api_key = None;
        assert!(matches!(
            TodoConfig::try_from(args),
            Err(ConfigError::MissingSetting("NOTION_API_KEY"))
        ));

        let mut args = base_args();
        args.notion_database_id = Some("   ".to_string());
        assert!(matches!(
            TodoConfig::try_from(args),
            Err(ConfigError::MissingSetting("NOTION_DATABASE_ID"))
        ));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let mut args = base_args();
        args.notion_base_url = "api.notion.com".to_string();
        assert!(matches!(
            TodoConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "NOTION_BASE_URL", .. })
        ));
    }

    #[test]
    fn zero_timeout_keeps_client_default() {
        let mut args = base_args();
        args.request_timeout_secs = Some(0);
        let config = TodoConfig::try_from(args).expect("config should parse");
        assert!(config.request_timeout.is_none());

        let mut args = base_args();
        args.request_timeout_secs = Some(10);
        let config = TodoConfig::try_from(args).expect("config should parse");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.store_config().request_timeout, Some(Duration::from_secs(10)));
    }
}
