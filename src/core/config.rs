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
use std::time::Duration;

use crate::core::reply::{
    DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS, DeliveryPolicy, REPLY_PLACEHOLDER, ReplySettings,
};
use crate::core::state::DEFAULT_BRAND;
use crate::core::view::Preferences;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub reply: ReplyConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub brand: Option<String>,
    pub sidebar_open: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReplyConfig {
    pub min_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
    pub delivery: Option<DeliveryPolicy>,
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PreferencesConfig {
    pub notifications: Option<bool>,
    pub sounds: Option<bool>,
    pub compact: Option<bool>,
    pub suggestions: Option<bool>,
}

/// Overrides taken from command-line flags (None / false = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub delivery: Option<DeliveryPolicy>,
    pub sidebar_closed: bool,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub brand: String,
    pub sidebar_open: bool,
    pub reply: ReplySettings,
    pub preferences: Preferences,
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
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ParleyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ParleyConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ParleyConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<ParleyConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ParleyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Parley Configuration
# All settings are optional - defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# brand = "Assistant"                # Or set PARLEY_BRAND env var
# sidebar_open = true

# [reply]
# min_delay_ms = 1200                # Simulated latency, inclusive
# max_delay_ms = 1800                # Simulated latency, exclusive
# delivery = "origin"                # "origin" or "active" (PARLEY_REPLY_DELIVERY)
# text = "Thanks for your message!"

# [preferences]
# notifications = true
# sounds = false
# compact = false
# suggestions = true
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
pub fn resolve(config: &ParleyConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Brand: env → config → default
    let brand = std::env::var("PARLEY_BRAND")
        .ok()
        .filter(|b| !b.trim().is_empty())
        .or_else(|| config.general.brand.clone())
        .unwrap_or_else(|| DEFAULT_BRAND.to_string());

    // Delivery: CLI → env → config → default
    let delivery = cli
        .delivery
        .or_else(|| {
            std::env::var("PARLEY_REPLY_DELIVERY").ok().and_then(|name| {
                let parsed = DeliveryPolicy::from_name(&name);
                if parsed.is_none() {
                    warn!("Ignoring unknown PARLEY_REPLY_DELIVERY value: {}", name);
                }
                parsed
            })
        })
        .or(config.reply.delivery)
        .unwrap_or_default();

    let sidebar_open = !cli.sidebar_closed && config.general.sidebar_open.unwrap_or(true);

    ResolvedConfig {
        brand,
        sidebar_open,
        reply: resolve_reply(&config.reply, delivery),
        preferences: resolve_preferences(&config.preferences),
    }
}

fn resolve_reply(reply: &ReplyConfig, delivery: DeliveryPolicy) -> ReplySettings {
    let min_ms = reply.min_delay_ms.unwrap_or(DEFAULT_MIN_DELAY_MS);
    let mut max_ms = reply.max_delay_ms.unwrap_or(DEFAULT_MAX_DELAY_MS);
    if max_ms <= min_ms {
        warn!(
            "reply.max_delay_ms ({}) must exceed min_delay_ms ({}), using {}",
            max_ms,
            min_ms,
            min_ms + 1
        );
        max_ms = min_ms + 1;
    }

    ReplySettings {
        min_delay: Duration::from_millis(min_ms),
        max_delay: Duration::from_millis(max_ms),
        delivery,
        text: reply
            .text
            .clone()
            .unwrap_or_else(|| REPLY_PLACEHOLDER.to_string()),
    }
}

fn resolve_preferences(prefs: &PreferencesConfig) -> Preferences {
    let defaults = Preferences::default();
    Preferences {
        notifications: prefs.notifications.unwrap_or(defaults.notifications),
        sounds: prefs.sounds.unwrap_or(defaults.sounds),
        compact: prefs.compact.unwrap_or(defaults.compact),
        suggestions: prefs.suggestions.unwrap_or(defaults.suggestions),
    }
}
