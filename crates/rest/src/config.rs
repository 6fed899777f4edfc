//! Server configuration for the gallery API.
//!
//! Configuration can be built programmatically or read from the command
//! line and environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GALLERY_SERVER_PORT` | 8080 | Server port |
//! | `GALLERY_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `GALLERY_LOG_LEVEL` | info | Log level |
//! | `GALLERY_MAX_BODY_SIZE` | 65536 | Max request body (bytes) |
//! | `GALLERY_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `GALLERY_ENABLE_CORS` | true | Enable CORS |
//! | `GALLERY_CORS_ORIGINS` | * | Allowed origins |
//! | `GALLERY_CORS_METHODS` | GET,POST,OPTIONS | Allowed methods |
//! | `GALLERY_CORS_HEADERS` | Content-Type,Accept | Allowed headers |
//! | `GALLERY_DATABASE_URL` | (memory) | `memory`, or a SQLite path / `:memory:` |
//! | `GALLERY_RELAY_URL` | (none) | Email relay endpoint |
//! | `GALLERY_RELAY_API_KEY` | (none) | Bearer token for the relay |
//! | `GALLERY_INQUIRY_FROM` | no-reply@maison-atelier.com | Inquiry sender |
//! | `GALLERY_INQUIRY_RECIPIENTS` | (none) | Comma-separated staff addresses |
//!
//! # Example
//!
//! ```rust
//! use gallery_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     inquiry_recipients: "sales@example.com".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.inquiry_settings().recipients, vec!["sales@example.com"]);
//! ```

use clap::Parser;
use gallery_content::InquirySettings;

/// Server configuration for the gallery API.
#[derive(Debug, Clone, Parser)]
#[command(name = "gallery")]
#[command(about = "Gallery content API server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "GALLERY_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "GALLERY_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "GALLERY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "GALLERY_MAX_BODY_SIZE", default_value = "65536")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "GALLERY_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "GALLERY_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "GALLERY_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "GALLERY_CORS_METHODS", default_value = "GET,POST,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "GALLERY_CORS_HEADERS", default_value = "Content-Type,Accept")]
    pub cors_headers: String,

    /// Database connection string.
    #[arg(long, env = "GALLERY_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Endpoint inquiries are relayed to. Inquiries fail when unset.
    #[arg(long, env = "GALLERY_RELAY_URL")]
    pub relay_url: Option<String>,

    /// Bearer token for the relay endpoint.
    #[arg(long, env = "GALLERY_RELAY_API_KEY", hide_env_values = true)]
    pub relay_api_key: Option<String>,

    /// Sender address on inquiry emails.
    #[arg(
        long,
        env = "GALLERY_INQUIRY_FROM",
        default_value = "no-reply@maison-atelier.com"
    )]
    pub inquiry_from: String,

    /// Staff addresses that receive inquiries (comma-separated).
    #[arg(long, env = "GALLERY_INQUIRY_RECIPIENTS", default_value = "")]
    pub inquiry_recipients: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 64 * 1024,
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept".to_string(),
            database_url: None,
            relay_url: None,
            relay_api_key: None,
            inquiry_from: "no-reply@maison-atelier.com".to_string(),
            inquiry_recipients: String::new(),
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The inquiry recipients, trimmed, with blanks removed.
    pub fn recipients(&self) -> Vec<String> {
        self.inquiry_recipients
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    /// Addressing handed to the inquiry flow.
    pub fn inquiry_settings(&self) -> InquirySettings {
        InquirySettings {
            from: self.inquiry_from.clone(),
            recipients: self.recipients(),
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.inquiry_from.trim().is_empty() {
            errors.push("Inquiry sender cannot be empty".to_string());
        }

        if self.relay_url.is_some() && self.recipients().is_empty() {
            errors.push("A relay is configured but no inquiry recipients are set".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 64 * 1024,
            request_timeout: 5,
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            database_url: None,
            relay_url: None,
            relay_api_key: None,
            inquiry_from: "gallery@example.com".to_string(),
            inquiry_recipients: "sales@example.com".to_string(),
        }
    }
}
