//! Per-project LLM provider configuration.
//!
//! Stored as JSON in `.apilens.json` at the project root. The API key may be
//! supplied through `APILENS_API_KEY` instead, which takes precedence over the
//! stored value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = ".apilens.json";
pub const API_KEY_ENV: &str = "APILENS_API_KEY";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Supported OpenAI-compatible chat-completion providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    #[default]
    DeepSeek,
    Glm,
    Qwen,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::DeepSeek, Provider::Glm, Provider::Qwen];

    /// Stable identifier used in the configuration file.
    pub fn id(&self) -> &'static str {
        match self {
            Self::DeepSeek => "DEEPSEEK",
            Self::Glm => "GLM",
            Self::Qwen => "QWEN",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DeepSeek => "DeepSeek",
            Self::Glm => "GLM (Zhipu AI)",
            Self::Qwen => "Qwen (Tongyi Qianwen)",
        }
    }

    pub fn default_api_url(&self) -> &'static str {
        match self {
            Self::DeepSeek => "https://api.deepseek.com/chat/completions",
            Self::Glm => "https://open.bigmodel.cn/api/paas/v4/chat/completions",
            Self::Qwen => "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::DeepSeek => "deepseek-chat",
            Self::Glm => "glm-4",
            Self::Qwen => "qwen-plus",
        }
    }

    /// Case-insensitive lookup by identifier.
    pub fn from_id_loose(id: &str) -> Option<Provider> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(id))
    }
}

impl Serialize for Provider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Unknown identifiers fall back to DeepSeek.
impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(Provider::from_id_loose(&id).unwrap_or_default())
    }
}

/// Provider, credentials and endpoint used for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: Provider,
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    /// Overall request timeout.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let provider = Provider::default();
        Self {
            provider,
            api_key: String::new(),
            api_url: provider.default_api_url().to_string(),
            model: provider.default_model().to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LlmConfig {
    pub fn path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE)
    }

    /// Load the project configuration and apply environment overrides.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_file(&Self::path(project_root))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Read a configuration file. A missing file yields the defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the configuration to `.apilens.json` under `project_root`.
    pub fn save(&self, project_root: &Path) -> Result<PathBuf, ConfigError> {
        let path = Self::path(project_root);
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json + "\n").map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), provider = self.provider.id(), "configuration saved");
        Ok(path)
    }

    /// Switch provider; the endpoint and model reset to its defaults.
    pub fn select_provider(&mut self, provider: Provider) {
        self.provider = provider;
        self.api_url = provider.default_api_url().to_string();
        self.model = provider.default_model().to_string();
    }

    pub fn apply_env_overrides(&mut self) {
        self.override_api_key(std::env::var(API_KEY_ENV).ok());
    }

    fn override_api_key(&mut self, value: Option<String>) {
        if let Some(key) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.api_key = key;
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// The key with everything but its first and last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.is_empty() {
            return "(not set)".to_string();
        }
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}
