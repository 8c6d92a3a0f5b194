//! Configuration management.
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Every binary reads the same `Config`; each one only looks at the
//! sections it needs.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub message_log: MessageLogConfig,
    pub demo: DemoConfig,
}

/// Deployment environment, taken from `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Production,
    #[default]
    Development,
    Test,
}

impl Environment {
    /// Read `NODE_ENV` (and `.env`) without logging.
    ///
    /// Used to pick the log format before tracing is installed; `Config::from_env`
    /// re-parses the value and reports anything it had to ignore.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        env::var("NODE_ENV")
            .ok()
            .and_then(|v| v.parse::<Environment>().ok())
            .unwrap_or_default()
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    /// Explicit `PORT`; each binary falls back to its own default.
    pub port: Option<u16>,
}

impl ServerConfig {
    /// Socket address to bind, using `default_port` when `PORT` is unset.
    pub fn bind_addr(&self, default_port: u16) -> crate::Result<SocketAddr> {
        let port = self.port.unwrap_or(default_port);
        format!("{}:{}", self.host, port)
            .parse()
            .map_err(|e| crate::Error::Config(format!("invalid bind address: {}", e)))
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite location, either a plain path or a `sqlite:` URL.
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct MessageLogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub shutdown_after: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = parse_environment(env::var("NODE_ENV").ok());

        let default_connections = if environment.is_production() { 10 } else { 5 };

        Self {
            environment,
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_parse("PORT"),
            },
            database: DatabaseConfig {
                url: env_or("DATABASE_URL", "sqlite://data/chat-memory.db"),
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(default_connections),
            },
            message_log: MessageLogConfig {
                path: PathBuf::from(env_or("MESSAGES_PATH", "./data/messages.json")),
            },
            demo: DemoConfig {
                shutdown_after: Duration::from_secs(env_parse("SHUTDOWN_AFTER_SECS").unwrap_or(3)),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_environment(raw: Option<String>) -> Environment {
    raw.and_then(|v| match v.parse::<Environment>() {
        Ok(env) => Some(env),
        Err(e) => {
            tracing::warn!("{}, falling back to development", e);
            None
        }
    })
    .unwrap_or_default()
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    parse_value(key, env::var(key).ok())
}

/// Parse an optional numeric variable, warning (not failing) on garbage.
fn parse_value<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}
