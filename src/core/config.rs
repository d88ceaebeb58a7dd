//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.muse/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::tool::Tool;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MuseConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_tool: Option<Tool>,
    pub toast_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub auth_token: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TOAST_SECS: u64 = 4;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub tool: Tool,
    pub base_url: String,
    pub auth_token: Option<String>,
    pub toast_secs: u64,
}

/// Values supplied on the command line. `None` means not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub tool: Option<Tool>,
    pub base_url: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.muse/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".muse").join("config.toml"))
}

/// Load config from `~/.muse/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MuseConfig::default()`.
pub fn load_config() -> Result<MuseConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(MuseConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<MuseConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(MuseConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MuseConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# Muse Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_tool = "conversation"      # "conversation" or "code"
# toast_secs = 4                     # how long error notifications stay up

# [backend]
# base_url = "http://localhost:3000" # Or set MUSE_BASE_URL
# auth_token = "..."                 # Or set MUSE_AUTH_TOKEN; sent as a Bearer token
"#;

fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &MuseConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &MuseConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Tool: CLI → env → config → default
    let tool = cli
        .tool
        .or_else(|| env("MUSE_TOOL").and_then(|s| Tool::parse(&s)))
        .or(config.general.default_tool)
        .unwrap_or_default();

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("MUSE_BASE_URL"))
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Auth token: env → config
    let auth_token = env("MUSE_AUTH_TOKEN").or_else(|| config.backend.auth_token.clone());

    ResolvedConfig {
        tool,
        base_url,
        auth_token,
        toast_secs: config.general.toast_secs.unwrap_or(DEFAULT_TOAST_SECS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&MuseConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.tool, Tool::Conversation);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.auth_token, None);
        assert_eq!(resolved.toast_secs, DEFAULT_TOAST_SECS);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MuseConfig {
            general: GeneralConfig {
                default_tool: Some(Tool::Code),
                toast_secs: Some(10),
            },
            backend: BackendConfig {
                base_url: Some("https://muse.example".to_string()),
                auth_token: Some("tok".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.tool, Tool::Code);
        assert_eq!(resolved.base_url, "https://muse.example");
        assert_eq!(resolved.auth_token.as_deref(), Some("tok"));
        assert_eq!(resolved.toast_secs, 10);
    }

    #[test]
    fn test_env_beats_config() {
        let config = MuseConfig {
            backend: BackendConfig {
                base_url: Some("https://from-file".to_string()),
                auth_token: Some("file-token".to_string()),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "MUSE_BASE_URL" => Some("https://from-env".to_string()),
            "MUSE_AUTH_TOKEN" => Some("env-token".to_string()),
            "MUSE_TOOL" => Some("code".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "https://from-env");
        assert_eq!(resolved.auth_token.as_deref(), Some("env-token"));
        assert_eq!(resolved.tool, Tool::Code);
    }

    #[test]
    fn test_cli_wins() {
        let config = MuseConfig {
            general: GeneralConfig {
                default_tool: Some(Tool::Code),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            tool: Some(Tool::Conversation),
            base_url: Some("http://127.0.0.1:9999".to_string()),
        };
        let env = |key: &str| (key == "MUSE_BASE_URL").then(|| "https://from-env".to_string());
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.tool, Tool::Conversation);
        assert_eq!(resolved.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_unknown_env_tool_falls_through() {
        let env = |key: &str| (key == "MUSE_TOOL").then(|| "music".to_string());
        let resolved = resolve_with_env(&MuseConfig::default(), &CliOverrides::default(), env);
        assert_eq!(resolved.tool, Tool::Conversation);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: MuseConfig = toml::from_str("[general]\ndefault_tool = \"code\"\n").unwrap();
        assert_eq!(config.general.default_tool, Some(Tool::Code));
        assert!(config.general.toast_secs.is_none());
        assert!(config.backend.base_url.is_none());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: MuseConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(config.general.default_tool.is_none());
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("muse-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");
        let config = load_config_from(&path).unwrap();
        assert!(config.backend.base_url.is_none());
        assert!(path.exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("muse-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general\ndefault_tool = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_dir_all(&dir);
    }
}
