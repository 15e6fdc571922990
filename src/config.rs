//! Configuration types for foli

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};

/// Environment variable holding the Behance API key / client id
pub const API_KEY_VAR: &str = "API";

/// Diagnostic printed when [`API_KEY_VAR`] is missing at startup
pub const MISSING_API_KEY_MESSAGE: &str = "API not set, exiting ...\nShould provide the Behance api key or client id in order to query images.";

/// Upstream (Behance) API settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the v2 API (default: "https://api.behance.net/v2")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key / client id sent as the `client_id` query parameter
    #[serde(default)]
    pub client_id: String,

    /// Page number requested from every listing endpoint (default: 1)
    #[serde(default = "default_page")]
    pub page: u32,

    /// User-Agent header for upstream requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: String::new(),
            page: default_page(),
            user_agent: default_user_agent(),
        }
    }
}

/// Data storage settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Database path (default: "./foli.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

/// Cover image download settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Directory images are written to, created on demand (default: "./images")
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,

    /// Bound on connection establishment; the body read itself is unbounded (default: 3 seconds)
    #[serde(default = "default_connect_timeout", with = "duration_serde")]
    pub connect_timeout: Duration,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            image_dir: default_image_dir(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// Main configuration for foli
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Data storage
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Cover image downloads
    #[serde(default)]
    pub images: ImageConfig,

    /// REST API settings
    #[serde(default)]
    pub server: ApiConfig,
}

impl Config {
    /// Build the configuration from process environment variables.
    ///
    /// `API` is required. The optional overrides are `FOLI_API_BASE_URL`,
    /// `FOLI_PAGE`, `FOLI_DATABASE_PATH`, `FOLI_IMAGE_DIR` and `FOLI_BIND_ADDRESS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset, except for `API` where only absence is fatal.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup(API_KEY_VAR).ok_or_else(|| Error::Config {
            message: MISSING_API_KEY_MESSAGE.to_string(),
            key: Some(API_KEY_VAR.to_string()),
        })?;

        let mut config = Config::default();
        config.upstream.client_id = client_id;

        let set = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(base_url) = set("FOLI_API_BASE_URL") {
            url::Url::parse(&base_url).map_err(|e| Error::Config {
                message: format!("invalid upstream base url '{}': {}", base_url, e),
                key: Some("FOLI_API_BASE_URL".to_string()),
            })?;
            config.upstream.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Some(page) = set("FOLI_PAGE") {
            config.upstream.page = page.parse().map_err(|_| Error::Config {
                message: format!("page must be a positive integer, got '{}'", page),
                key: Some("FOLI_PAGE".to_string()),
            })?;
        }

        if let Some(path) = set("FOLI_DATABASE_PATH") {
            config.persistence.database_path = PathBuf::from(path);
        }

        if let Some(dir) = set("FOLI_IMAGE_DIR") {
            config.images.image_dir = PathBuf::from(dir);
        }

        if let Some(addr) = set("FOLI_BIND_ADDRESS") {
            config.server.bind_address = addr.parse().map_err(|e| Error::Config {
                message: format!("invalid bind address '{}': {}", addr, e),
                key: Some("FOLI_BIND_ADDRESS".to_string()),
            })?;
        }

        Ok(config)
    }
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.behance.net/v2".into()
}

fn default_page() -> u32 {
    1
}

fn default_user_agent() -> String {
    concat!("foli/", env!("CARGO_PKG_VERSION")).into()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./foli.db")
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("./images")
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(3)
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
