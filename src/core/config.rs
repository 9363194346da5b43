//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.parley/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_BASE_URL;
use crate::core::locale::Locale;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub locale: Option<Locale>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub locale: Locale,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub base_url: Option<&'a str>,
    pub locale: Option<Locale>,
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

/// Returns the path to `~/.parley/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parley").join("config.toml"))
}

/// Load config from `~/.parley/config.toml`.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(ParleyConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ParleyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<ParleyConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ParleyConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ParleyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Parley Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# locale = "en"                       # "en" or "es" (or PARLEY_LOCALE)

# [server]
# base_url = "http://localhost:5000"  # Or set PARLEY_BASE_URL env var
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
pub fn resolve(config: &ParleyConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &ParleyConfig,
    cli: &CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .map(|s| s.to_string())
        .or_else(|| env("PARLEY_BASE_URL"))
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Locale: CLI → env → config → default
    let env_locale = env("PARLEY_LOCALE").and_then(|code| {
        let parsed = Locale::from_code(&code);
        if parsed.is_none() {
            warn!("Ignoring unknown PARLEY_LOCALE value: {}", code);
        }
        parsed
    });
    let locale = cli
        .locale
        .or(env_locale)
        .or(config.general.locale)
        .unwrap_or_default();

    ResolvedConfig { base_url, locale }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&ParleyConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.locale, Locale::En);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ParleyConfig {
            general: GeneralConfig {
                locale: Some(Locale::Es),
            },
            server: ServerConfig {
                base_url: Some("http://agent.lan:8080".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, "http://agent.lan:8080");
        assert_eq!(resolved.locale, Locale::Es);
    }

    #[test]
    fn test_env_overrides_config() {
        let config = ParleyConfig {
            server: ServerConfig {
                base_url: Some("http://from-file".to_string()),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "PARLEY_BASE_URL" => Some("http://from-env".to_string()),
            "PARLEY_LOCALE" => Some("es-ES".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.locale, Locale::Es);
    }

    #[test]
    fn test_unknown_env_locale_falls_through() {
        let config = ParleyConfig {
            general: GeneralConfig {
                locale: Some(Locale::Es),
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "PARLEY_LOCALE").then(|| "klingon".to_string());
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.locale, Locale::Es);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let env = |key: &str| match key {
            "PARLEY_BASE_URL" => Some("http://from-env".to_string()),
            "PARLEY_LOCALE" => Some("es".to_string()),
            _ => None,
        };
        let cli = CliOverrides {
            base_url: Some("http://from-cli"),
            locale: Some(Locale::En),
        };
        let resolved = resolve_with_env(&ParleyConfig::default(), &cli, env);
        assert_eq!(resolved.base_url, "http://from-cli");
        assert_eq!(resolved.locale, Locale::En);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[server]
base_url = "http://127.0.0.1:5000"
"#;
        let config: ParleyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url.as_deref(), Some("http://127.0.0.1:5000"));
        assert!(config.general.locale.is_none());
    }

    #[test]
    fn test_locale_from_toml() {
        let config: ParleyConfig = toml::from_str("[general]\nlocale = \"es\"\n").unwrap();
        assert_eq!(config.general.locale, Some(Locale::Es));
    }

    #[test]
    fn test_bad_locale_is_parse_error() {
        assert!(toml::from_str::<ParleyConfig>("[general]\nlocale = \"fr\"\n").is_err());
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("parley-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.server.base_url.is_none());
        assert!(path.exists());

        // The generated file is all comments and parses back to defaults
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.general.locale.is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("parley-config-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[server\nbase_url = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
