use anyhow::Context;
use serde::Deserialize;

/// Environment variable holding the completion API credential. Never stored
/// in the configuration file.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalesConfig {
    pub default: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationDefaults {
    pub max_tokens: u64,
    pub temperature: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterConfig {
    pub base_url: String,
    pub default_model: String,
    pub defaults: GenerationDefaults,
    /// Forces the offline mock backend regardless of credentials.
    #[serde(default)]
    pub use_mock: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub locales: LocalesConfig,
    pub openrouter: OpenRouterConfig,
}

impl AppConfig {
    pub fn load(config_path: &str) -> anyhow::Result<Self> {
        let config_file = std::fs::File::open(config_path)
            .with_context(|| format!("failed to open {config_path}"))?;
        let config = serde_yaml::from_reader(config_file)
            .with_context(|| format!("failed to parse {config_path}"))?;
        Ok(config)
    }

    /// The completion API credential, if one is configured. An empty value
    /// counts as absent.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty())
    }
}
