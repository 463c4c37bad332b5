//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.sous/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::inference::OpenAiSettings;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SousConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub function: FunctionConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_provider: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FunctionConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub system_prompt: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PROVIDER: &str = "function";
pub const DEFAULT_FUNCTION_ENDPOINT: &str =
    "https://functions.poehali.dev/190854ee-6fa9-4798-9189-2f22ad626de3";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an experienced chef and cooking assistant. \
    Give practical cooking advice and recipes, and help with ingredient substitutions. \
    Be friendly and easy to follow.";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Which backend answers chat messages.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderSettings {
    /// The hosted chat function (`{message}` in, `{reply}` out).
    Function { endpoint: String },
    /// Direct Chat Completions calls.
    OpenAi(OpenAiSettings),
}

impl ProviderSettings {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderSettings::Function { .. } => "function",
            ProviderSettings::OpenAi(_) => "openai",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub provider: ProviderSettings,
}

/// Flags from the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub provider: Option<String>,
    pub endpoint: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// The settings load but cannot work (unknown provider, missing key).
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.sous/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sous").join("config.toml"))
}

/// Load config from `~/.sous/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SousConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SousConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SousConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SousConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<SousConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SousConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // api_key is deliberately left out of the log
    debug!(
        "Config: provider={:?}, endpoint={:?}, openai_model={:?}",
        config.general.default_provider, config.function.endpoint, config.openai.model
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Sous Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_provider = "function"      # "function" or "openai"

# [function]
# endpoint = "https://functions.poehali.dev/190854ee-6fa9-4798-9189-2f22ad626de3"

# [openai]
# api_key = "sk-..."                 # Or set OPENAI_API_KEY env var
# base_url = "https://api.openai.com/v1"
# model = "gpt-3.5-turbo"
# temperature = 0.7
# max_tokens = 500
# timeout_secs = 30
# system_prompt = "You are an experienced chef and cooking assistant."
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SousConfig, cli: &CliOverrides) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment lookup injected so tests don't
/// depend on (or mutate) the process environment.
pub fn resolve_with_env<F>(
    config: &SousConfig,
    cli: &CliOverrides,
    env: F,
) -> Result<ResolvedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Provider: CLI → env → config → default
    let provider_name = cli
        .provider
        .clone()
        .or_else(|| env("SOUS_PROVIDER"))
        .or_else(|| config.general.default_provider.clone())
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let provider = match provider_name.to_lowercase().as_str() {
        "function" => {
            // Endpoint: CLI → env → config → default
            let endpoint = cli
                .endpoint
                .clone()
                .or_else(|| env("SOUS_ENDPOINT"))
                .or_else(|| config.function.endpoint.clone())
                .unwrap_or_else(|| DEFAULT_FUNCTION_ENDPOINT.to_string());
            ProviderSettings::Function { endpoint }
        }
        "openai" => ProviderSettings::OpenAi(resolve_openai(&config.openai, &env)?),
        other => {
            return Err(ConfigError::Invalid(format!(
                "unknown provider '{other}' (expected \"function\" or \"openai\")"
            )));
        }
    };

    Ok(ResolvedConfig { provider })
}

fn resolve_openai<F>(openai: &OpenAiConfig, env: &F) -> Result<OpenAiSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // API key: env → config
    let api_key = env("OPENAI_API_KEY")
        .or_else(|| openai.api_key.clone())
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            ConfigError::Invalid(
                "OpenAI API key must be set (config file or OPENAI_API_KEY env var)".to_string(),
            )
        })?;

    // Base URL: env → config → default
    let base_url = env("OPENAI_BASE_URL")
        .or_else(|| openai.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

    // Model: env → config → default
    let model = env("OPENAI_MODEL")
        .or_else(|| openai.model.clone())
        .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());

    Ok(OpenAiSettings {
        api_key,
        base_url: base_url.trim_end_matches('/').to_string(),
        model,
        temperature: openai.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        max_tokens: openai.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        timeout: Duration::from_secs(openai.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        system_prompt: openai
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
    })
}
