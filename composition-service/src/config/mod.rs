use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default upstream for chat completions.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when `OPENAI_MODEL` is unset.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo-preview";

/// Completion token budget for every composition.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Environment variable holding the upstream credential.
pub const DEFAULT_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Assembled by [`CompositionConfig::load`] or directly in tests.
#[derive(Debug, Clone)]
pub struct CompositionConfig {
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Name of the variable the credential is read from on every request.
    pub api_key_var: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key_var: DEFAULT_API_KEY_VAR.to_string(),
        }
    }
}

impl CompositionConfig {
    /// Load listener settings via `service_core` and upstream settings from
    /// `OPENAI_*` variables. The credential itself is not read here.
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let max_tokens = get_env("OPENAI_MAX_TOKENS", &DEFAULT_MAX_TOKENS.to_string());
        let max_tokens = max_tokens.parse::<u32>().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "OPENAI_MAX_TOKENS must be a positive integer, got '{}': {}",
                max_tokens,
                e
            ))
        })?;

        Ok(CompositionConfig {
            common: common_config,
            openai: OpenAiConfig {
                base_url: get_env("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)
                    .trim_end_matches('/')
                    .to_string(),
                model: get_env("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
                max_tokens,
                api_key_var: get_env("OPENAI_API_KEY_VAR", DEFAULT_API_KEY_VAR),
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
