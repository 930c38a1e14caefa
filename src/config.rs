use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";
const PLACEHOLDER_API_KEY: &str = "YOUR_ELEVENLABS_API_KEY_HERE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub elevenlabs: ElevenLabsConfig,
    pub audio_settings: AudioSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevenLabsConfig {
    pub api_key: String,
    pub voice_id: String,
    pub voice_name: String,
    pub model_id: String,
    pub base_url: String,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            voice_name: "Rachel".to_string(),
            model_id: "eleven_monolingual_v1".to_string(),
            base_url: "https://api.elevenlabs.io".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub output_directory: PathBuf,
    pub scripts_directory: PathBuf,
    /// Hz. Also the PCM rate requested from the backend.
    pub sample_rate: u32,
    pub trailing_buffer_seconds: u64,
    pub pacing_ms: u64,
    /// Longest bed (duration plus trailing buffer) a script may ask for.
    pub max_duration_seconds: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("generated_audio"),
            scripts_directory: PathBuf::from("C25K_Audio_Scripts"),
            sample_rate: 22050,
            trailing_buffer_seconds: 10,
            pacing_ms: 500,
            max_duration_seconds: 4 * 60 * 60,
        }
    }
}

impl AudioSettings {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

impl AppConfig {
    /// Reads `path` if it exists, otherwise starts from defaults. The API key
    /// from the environment wins over the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            AppConfig::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.elevenlabs.api_key = key;
            }
        }

        Ok(config)
    }

    /// Fails unless a usable API key is set. Only synthesis needs one.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        let key = self.elevenlabs.api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(key)
    }
}
