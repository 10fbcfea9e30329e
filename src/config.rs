//! tripdaemon configuration types and loading

use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::llm::LlmError;

/// Main tripdaemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration (enrichment layer)
    pub llm: LlmConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Live routing provider configuration
    pub routing: RoutingConfig,

    /// Planner defaults
    pub planner: PlannerConfig,

    /// Session store limits
    pub sessions: SessionConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tripdaemon.yml
        let local_config = PathBuf::from(".tripdaemon.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tripdaemon/tripdaemon.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tripdaemon").join("tripdaemon.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
///
/// A missing API key is not an error: the planner then runs with the
/// deterministic extraction and template responses only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "anthropic" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String, LlmError> {
        std::env::var(&self.api_key_env).map_err(|_| LlmError::MissingApiKey(self.api_key_env.clone()))
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 1024,
            timeout_ms: 30_000,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Live routing provider configuration
///
/// The live path is enabled only when the API key environment variable is
/// set; otherwise the routing tool serves static fallback routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Environment variable containing the routing API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Routing API base URL (OpenRouteService-compatible)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl RoutingConfig {
    /// Read the routing API key, if configured in the environment
    pub fn get_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok()
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ORS_API_KEY".to_string(),
            base_url: "https://api.openrouteservice.org".to_string(),
            timeout_ms: 15_000,
        }
    }
}

/// Planner defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Daily distance used when the request specifies none, in km
    #[serde(rename = "default-daily-km")]
    pub default_daily_km: f64,

    /// Accommodation type used when the request specifies none
    #[serde(rename = "default-accommodation")]
    pub default_accommodation: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_daily_km: 100.0,
            default_accommodation: "camping".to_string(),
        }
    }
}

/// Session store limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum retained sessions; least-recently-used beyond this are evicted
    #[serde(rename = "max-sessions")]
    pub max_sessions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_sessions: 1024 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.planner.default_daily_km, 100.0);
        assert_eq!(config.planner.default_accommodation, "camping");
        assert_eq!(config.sessions.max_sessions, 1024);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  provider: anthropic
  model: claude-opus-4
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  max-tokens: 512
  timeout-ms: 60000

server:
  host: 127.0.0.1
  port: 9000

planner:
  default-daily-km: 80
  default-accommodation: hostel
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "claude-opus-4");
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.planner.default_daily_km, 80.0);
        assert_eq!(config.planner.default_accommodation, "hostel");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
server:
  port: 3000
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.server.port, 3000);

        // Defaults for unspecified
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.routing.base_url, "https://api.openrouteservice.org");
    }

    #[test]
    fn test_missing_api_key_is_error() {
        let mut llm = LlmConfig::default();
        llm.api_key_env = "TRIPDAEMON_TEST_UNSET_KEY_9c41".to_string();

        let result = llm.get_api_key();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("TRIPDAEMON_TEST_UNSET_KEY_9c41"));
    }
}
