// ABOUTME: Configuration module for the script-deck application
// ABOUTME: Provides configuration settings and environment variable handling

use crate::errors::{DeckError, Result};
use crate::gemini::GeminiConfig;
use crate::session::ResolverSettings;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_DAILY_LIMIT: u32 = 100;
pub const DEFAULT_COOLDOWN_MS: u64 = 2000;
pub const DEFAULT_OUTPUT_FILE: &str = "AI_Presentation.pptx";

/// Global configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub daily_limit: u32,
    pub cooldown_ms: u64,
    pub timeout_ms: u64,
    pub aspect_ratio: String,
    pub state_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            daily_limit: DEFAULT_DAILY_LIMIT,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            timeout_ms: 120_000,
            aspect_ratio: "16:9".to_string(),
            state_dir: default_state_dir(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let base_url = env::var("GEMINI_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let text_model = env::var("DECK_TEXT_MODEL").unwrap_or(defaults.text_model);
        let image_model = env::var("DECK_IMAGE_MODEL").unwrap_or(defaults.image_model);
        let daily_limit = env::var("DECK_DAILY_LIMIT")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.daily_limit);
        let cooldown_ms = env::var("DECK_COOLDOWN_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.cooldown_ms);
        let timeout_ms = env::var("DECK_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_ms);
        let state_dir = env::var("DECK_HOME")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.state_dir);

        Self {
            api_key,
            base_url,
            text_model,
            image_model,
            daily_limit,
            cooldown_ms,
            timeout_ms,
            aspect_ratio: defaults.aspect_ratio,
            state_dir,
        }
    }

    /// Path of the persisted daily usage counter
    pub fn quota_path(&self) -> PathBuf {
        self.state_dir.join("quota.json")
    }

    /// Get the image resolution settings
    pub fn get_resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            cooldown: Duration::from_millis(self.cooldown_ms),
            aspect_ratio: self.aspect_ratio.clone(),
        }
    }

    /// Get the Gemini client configuration. Fails when no credential is set.
    pub fn get_gemini_config(&self) -> Result<GeminiConfig> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            DeckError::ConfigError(
                "No API key found. Set GEMINI_API_KEY (or API_KEY) in the environment.".to_string(),
            )
        })?;

        Ok(GeminiConfig {
            api_key,
            base_url: self.base_url.clone(),
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        })
    }
}

fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config").join("script-deck"))
        .unwrap_or_else(|| PathBuf::from(".script-deck"))
}
