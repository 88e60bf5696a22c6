use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://api.example.io/v2";
/// Largest `limit` the API accepts on paginated endpoints.
pub const MAX_PAGE_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root every request path is appended to
    pub base_url: String,
    /// Per-request deadline in seconds
    pub timeout_seconds: u64,
    /// Items requested per page (1..=20)
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Ceiling for paginated list responses
    pub max_response_bytes: usize,
    /// Ceiling for single-resource lookups (agent, ship, waypoint)
    pub single_resource_bytes: usize,
    /// Ceiling for the registration response
    pub registration_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append every API call to this file when set
    pub api_log_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub token_file: String,
    pub save_dir: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            page_size: MAX_PAGE_LIMIT,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_response_bytes: 1024 * 1024, // 1 MiB
            single_resource_bytes: 10_000,
            registration_bytes: 20_000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_file: crate::AGENT_TOKEN_FILE.to_string(),
            save_dir: "savefiles".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> Result<Self> {
        if Path::new(config_path).exists() {
            info!(path = config_path, "loading configuration");
            let config_str = fs::read_to_string(config_path)?;
            let config: ClientConfig = toml::from_str(&config_str)?;
            Ok(config)
        } else {
            info!(path = config_path, "creating default configuration");
            let config = ClientConfig::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self, config_path: &str) -> Result<()> {
        if let Some(parent) = Path::new(config_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    /// Override the API root, e.g. to point at a mock server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.api.page_size = page_size;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(Error::configuration("base_url has not been set"));
        }
        if reqwest::Url::parse(&self.api.base_url).is_err() {
            return Err(Error::configuration(format!(
                "base_url is not a valid URL: {}",
                self.api.base_url
            )));
        }

        validate_page_size(self.api.page_size)?;

        if self.api.timeout_seconds == 0 {
            return Err(Error::configuration("timeout_seconds must be greater than 0"));
        }

        let limits = [
            ("max_response_bytes", self.limits.max_response_bytes),
            ("single_resource_bytes", self.limits.single_resource_bytes),
            ("registration_bytes", self.limits.registration_bytes),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(Error::configuration(format!("{name} must be greater than 0")));
            }
        }

        Ok(())
    }

    pub fn log_summary(&self) {
        info!(
            base_url = %self.api.base_url,
            page_size = self.api.page_size,
            timeout_seconds = self.api.timeout_seconds,
            max_response_bytes = self.limits.max_response_bytes,
            api_log = self.logging.api_log_path.as_deref().unwrap_or("off"),
            "client configuration"
        );
    }
}

pub fn validate_page_size(page_size: u32) -> Result<()> {
    if page_size == 0 || page_size > MAX_PAGE_LIMIT {
        return Err(Error::configuration(format!(
            "page_size must be between 1 and {MAX_PAGE_LIMIT}, got {page_size}"
        )));
    }
    Ok(())
}
