use serde::Deserialize;
use std::net::SocketAddr;

use persistence::db::DatabaseConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub databases: DatabasesConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

/// Which transport the data clients use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The hosted REST backend.
    #[default]
    Rest,
    /// In-process tables, for local development.
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabasesConfig {
    #[serde(default)]
    pub backend: BackendKind,

    #[serde(default = "default_backend_timeout")]
    pub request_timeout_secs: u64,

    /// Users, news, rules, sections and site info.
    #[serde(default)]
    pub main: BackendEndpoint,

    /// Store sections, packages and discounts.
    #[serde(default)]
    pub other: BackendEndpoint,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendEndpoint {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub key: String,
}

impl DatabasesConfig {
    pub fn main(&self) -> DatabaseConfig {
        self.endpoint(&self.main)
    }

    pub fn other(&self) -> DatabaseConfig {
        self.endpoint(&self.other)
    }

    fn endpoint(&self, endpoint: &BackendEndpoint) -> DatabaseConfig {
        DatabaseConfig {
            url: endpoint.url.clone(),
            key: endpoint.key.clone(),
            request_timeout_secs: self.request_timeout_secs,
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

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Admin session tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret. Login is unavailable while empty.
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_session_expiry")]
    pub session_expiry_secs: i64,

    #[serde(default = "default_jwt_leeway")]
    pub leeway_secs: u64,

    /// Require a session on admin and mutation routes.
    #[serde(default)]
    pub enforce_admin_session: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Support contact link shown next to the site info.
    #[serde(default)]
    pub support_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_body_size() -> usize {
    1_048_576 // 1MB
}
fn default_backend_timeout() -> u64 {
    10
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_session_expiry() -> i64 {
    43_200 // 12 hours
}
fn default_jwt_leeway() -> u64 {
    shared::jwt::DEFAULT_LEEWAY_SECS
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with PORTAL__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("PORTAL")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("security.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Defaults are embedded so tests do not depend on the working directory.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30
            max_body_size = 1048576

            [databases]
            backend = "rest"
            request_timeout_secs = 10

            [databases.main]
            url = ""
            key = ""

            [databases.other]
            url = ""
            key = ""

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []

            [auth]
            jwt_secret = "test-secret"
            session_expiry_secs = 3600
            leeway_secs = 30
            enforce_admin_session = false

            [site]
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        // Validation is left to the caller so tests can build partial configs.
        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.auth.enforce_admin_session && self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "PORTAL__AUTH__JWT_SECRET must be set when admin sessions are enforced"
                    .to_string(),
            ));
        }

        if self.auth.session_expiry_secs <= 0 {
            return Err(ConfigValidationError::InvalidValue(
                "auth.session_expiry_secs must be positive".to_string(),
            ));
        }

        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            return Err(ConfigValidationError::InvalidValue(format!(
                "logging.format must be \"json\" or \"pretty\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigValidationError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|_| {
                ConfigValidationError::InvalidValue(format!(
                    "Invalid listen address {}:{}",
                    self.server.host, self.server.port
                ))
            })
    }
}
