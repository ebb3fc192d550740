use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::generation::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "ecodeck";

/// Environment variables consulted for the Gemini key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub const DEFAULT_IMAGE_HOST: &str = "https://picsum.photos";

pub const VALID_KEYS: &str =
    "gemini.api_key, gemini.model, gemini.endpoint, images.host, defaults.windowed";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<ImagesConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key. If not set, falls back to GEMINI_API_KEY, then API_KEY.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImagesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `ecodeck config init` to create one.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# EcoDeck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the API key from config, then the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        let configured = self
            .gemini
            .as_ref()
            .and_then(|g| g.api_key.clone())
            .filter(|key| !key.is_empty());
        configured.or_else(|| {
            API_KEY_ENV_VARS
                .iter()
                .filter_map(|var| std::env::var(var).ok())
                .find(|key| !key.is_empty())
        })
    }

    pub fn model(&self) -> &str {
        self.gemini
            .as_ref()
            .and_then(|g| g.model.as_deref())
            .unwrap_or(DEFAULT_MODEL)
    }

    pub fn endpoint(&self) -> &str {
        self.gemini
            .as_ref()
            .and_then(|g| g.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn image_host(&self) -> &str {
        self.images
            .as_ref()
            .and_then(|i| i.host.as_deref())
            .unwrap_or(DEFAULT_IMAGE_HOST)
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "gemini.api_key" => {
                if value.trim().is_empty() {
                    anyhow::bail!("API key must not be empty.");
                }
                self.gemini
                    .get_or_insert_with(GeminiConfig::default)
                    .api_key = Some(value.to_string());
            }
            "gemini.model" => {
                if value.trim().is_empty() || value.contains(char::is_whitespace) {
                    anyhow::bail!(
                        "Invalid model: '{value}'. Must be a model id like '{DEFAULT_MODEL}'."
                    );
                }
                self.gemini.get_or_insert_with(GeminiConfig::default).model =
                    Some(value.to_string());
            }
            "gemini.endpoint" => {
                check_url(value)?;
                self.gemini
                    .get_or_insert_with(GeminiConfig::default)
                    .endpoint = Some(value.to_string());
            }
            "images.host" => {
                check_url(value)?;
                self.images.get_or_insert_with(ImagesConfig::default).host =
                    Some(value.to_string());
            }
            "defaults.windowed" => {
                let windowed = match value {
                    "true" => true,
                    "false" => false,
                    _ => anyhow::bail!("Invalid windowed: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(windowed);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }
}

fn check_url(value: &str) -> Result<()> {
    if value.starts_with("https://") || value.starts_with("http://") {
        Ok(())
    } else {
        anyhow::bail!("Invalid URL: {value}. Must start with 'http://' or 'https://'.")
    }
}

/// Mask all but the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}
