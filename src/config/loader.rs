//! Configuration file loading with precedence handling.

use super::ListConfig;
use crate::surface::ItemMetrics;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending setting.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/vlist/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Keep hover highlight while a selection exists.
    #[serde(default)]
    pub selected_plus_hover: Option<bool>,

    /// Hide broken icon images.
    #[serde(default)]
    pub hide_broken_image_icons: Option<bool>,

    /// Signed adjustment to the computed text width.
    #[serde(default)]
    pub menu_text_width_correction_offset: Option<i32>,

    /// Row height in cells.
    #[serde(default)]
    pub item_height: Option<u32>,

    /// Prefix icon column width in cells.
    #[serde(default)]
    pub prefix_icon_width: Option<u32>,

    /// Suffix icon column width in cells.
    #[serde(default)]
    pub suffix_icon_width: Option<u32>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Options handed to the list.
    pub list: ListConfig,
    /// Row height.
    pub item_height: u32,
    /// Prefix icon width.
    pub prefix_icon_width: u32,
    /// Suffix icon width.
    pub suffix_icon_width: u32,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let metrics = ItemMetrics::default();
        Self {
            list: ListConfig::default(),
            item_height: metrics.item_height() as u32,
            prefix_icon_width: metrics.prefix_width() as u32,
            suffix_icon_width: metrics.suffix_width() as u32,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Item geometry for the surface.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero item height.
    pub fn item_metrics(&self) -> Result<ItemMetrics, ConfigError> {
        ItemMetrics::new(self.item_height, self.prefix_icon_width, self.suffix_icon_width).map_err(
            |e| ConfigError::InvalidValue {
                field: "item_height",
                reason: e.to_string(),
            },
        )
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/vlist/vlist.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("vlist").join("vlist.log")
    } else {
        PathBuf::from("vlist.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/vlist/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vlist").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `VLIST_CONFIG` environment variable
/// 3. Default path `~/.config/vlist/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("VLIST_CONFIG") {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(
                "VLIST_CONFIG is set but empty".to_string(),
            ));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `VLIST_SELECTED_PLUS_HOVER`: bool
/// - `VLIST_HIDE_BROKEN_IMAGES`: bool
/// - `VLIST_TEXT_WIDTH_OFFSET`: signed integer
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("VLIST_SELECTED_PLUS_HOVER") {
        match parse_bool(&raw) {
            Some(value) => config.list.selected_plus_hover = value,
            None => warn!(value = %raw, "Ignoring invalid VLIST_SELECTED_PLUS_HOVER"),
        }
    }

    if let Ok(raw) = std::env::var("VLIST_HIDE_BROKEN_IMAGES") {
        match parse_bool(&raw) {
            Some(value) => config.list.hide_broken_image_icons = value,
            None => warn!(value = %raw, "Ignoring invalid VLIST_HIDE_BROKEN_IMAGES"),
        }
    }

    if let Ok(raw) = std::env::var("VLIST_TEXT_WIDTH_OFFSET") {
        match raw.trim().parse::<i32>() {
            Ok(value) => config.list.menu_text_width_correction_offset = value,
            Err(_) => warn!(value = %raw, "Ignoring invalid VLIST_TEXT_WIDTH_OFFSET"),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        list: ListConfig {
            selected_plus_hover: config
                .selected_plus_hover
                .unwrap_or(defaults.list.selected_plus_hover),
            hide_broken_image_icons: config
                .hide_broken_image_icons
                .unwrap_or(defaults.list.hide_broken_image_icons),
            menu_text_width_correction_offset: config
                .menu_text_width_correction_offset
                .unwrap_or(defaults.list.menu_text_width_correction_offset),
        },
        item_height: config.item_height.unwrap_or(defaults.item_height),
        prefix_icon_width: config.prefix_icon_width.unwrap_or(defaults.prefix_icon_width),
        suffix_icon_width: config.suffix_icon_width.unwrap_or(defaults.suffix_icon_width),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Arguments
///
/// * `config` - Base resolved config (already merged with defaults, file, and env vars)
/// * `item_height_override` - Optional row height from `--item-height`
/// * `hide_broken_override` - Optional flag from `--hide-broken-images`
/// * `selected_plus_hover_override` - Optional flag from `--selected-plus-hover`
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    item_height_override: Option<u32>,
    hide_broken_override: Option<bool>,
    selected_plus_hover_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(height) = item_height_override {
        config.item_height = height;
    }

    if let Some(hide) = hide_broken_override {
        config.list.hide_broken_image_icons = hide;
    }

    if let Some(hover) = selected_plus_hover_override {
        config.list.selected_plus_hover = hover;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
