//! Run configuration loaded from `mailforge.toml`.

use std::path::Path;

use serde::Deserialize;

use crate::domain::AppError;

/// Top-level configuration. Every field has a default; the file is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Model service settings.
    #[serde(default)]
    pub model: ModelConfig,
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load `mailforge.toml` from the given directory, falling back to
    /// defaults when the file does not exist.
    pub fn load(dir: &Path) -> Result<AppConfig, AppError> {
        let path = dir.join("mailforge.toml");
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }
}

/// Model service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Messages endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Model used for planning.
    #[serde(default = "default_planner")]
    pub planner: String,
    /// Model substituted on the single retry after a transient failure.
    #[serde(default = "default_fallback")]
    pub fallback: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Delay before the retry attempt, in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Output token ceiling per request.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            planner: default_planner(),
            fallback: default_fallback(),
            timeout_secs: default_timeout(),
            retry_delay_ms: default_retry_delay(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_planner() -> String {
    "claude-opus-5".to_string()
}

fn default_fallback() -> String {
    "claude-opus-4-8".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_retry_delay() -> u64 {
    500
}

fn default_max_tokens() -> u32 {
    8192
}

/// Output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the HTML and text artifacts are written to.
    #[serde(default = "default_out_dir")]
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_out_dir() }
    }
}

fn default_out_dir() -> String {
    "out".to_string()
}
