use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    /// Producer session verification configuration
    pub session: SessionConfig,
    /// Object storage configuration for event and product images
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// The pool configuration the persistence layer expects.
    pub fn pool_config(&self) -> persistence::db::DatabaseConfig {
        persistence::db::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout_secs: self.connect_timeout_secs,
            idle_timeout_secs: self.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Producer session tokens are issued by the external auth service; the API
/// only verifies them, so it carries the public key alone.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// RSA public key in PEM format for verifying session tokens
    pub public_key: String,

    /// Leeway in seconds for clock skew tolerance (default: 30)
    #[serde(default = "default_session_leeway")]
    pub leeway_secs: u64,
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage provider: http (S3-compatible endpoint) or console (for development)
    #[serde(default = "default_storage_provider")]
    pub provider: String,

    /// Upload endpoint base URL (for http provider)
    #[serde(default)]
    pub endpoint: String,

    /// Public base URL prefixed onto stored object paths
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Fallback URL recorded when a cover image upload fails
    #[serde(default = "default_placeholder_url")]
    pub placeholder_url: String,

    /// Upload request timeout in milliseconds
    #[serde(default = "default_storage_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_storage_provider(),
            endpoint: String::new(),
            public_base_url: default_public_base_url(),
            placeholder_url: default_placeholder_url(),
            timeout_ms: default_storage_timeout_ms(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    5
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_session_leeway() -> u64 {
    shared::jwt::DEFAULT_LEEWAY_SECS
}
fn default_storage_provider() -> String {
    "console".to_string()
}
fn default_public_base_url() -> String {
    "https://cdn.ingresso.local".to_string()
}
fn default_placeholder_url() -> String {
    "https://cdn.ingresso.local/static/event-cover-placeholder.png".to_string()
}
fn default_storage_timeout_ms() -> u64 {
    10000
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with INGRESSO__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("INGRESSO").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the values no deployment can run without.
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "database.url must be set".to_string(),
            ));
        }
        if self.session.public_key.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "session.public_key must be set".to_string(),
            ));
        }
        if self.storage.provider == "http" && self.storage.endpoint.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "storage.endpoint must be set for the http provider".to_string(),
            ));
        }
        Ok(())
    }

    /// The socket address the server binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.server.port)))
    }
}
