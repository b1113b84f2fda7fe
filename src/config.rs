use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Which persistence backend to use. Selected here, once, at startup —
/// never probed at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Durable JSON file in the data directory.
    File,
    /// Session-only, nothing persisted across runs.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_backend")]
    pub storage_backend: StorageBackend,
    /// Path of the problems JSON file. Empty means "profile default".
    #[serde(default)]
    pub data_path: String,
    /// Path of the catalog snapshot used for offline autocomplete.
    /// Empty means "profile default".
    #[serde(default)]
    pub catalog_path: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_proxy_host")]
    pub proxy_host: String,
    #[serde(default = "default_proxy_port")]
    pub proxy_port: u16,
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width_percent: u16,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_toggle_sidebar")]
    pub toggle_sidebar: String,
    #[serde(default = "default_new")]
    pub new: String,
    #[serde(default = "default_edit")]
    pub edit: String,
    #[serde(default = "default_save")]
    pub save: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_search")]
    pub search: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_enrich")]
    pub enrich: String,
    #[serde(default = "default_yank_code")]
    pub yank_code: String,
    #[serde(default = "default_yank_url")]
    pub yank_url: String,
    #[serde(default = "default_word_left")]
    pub word_left: String,
    #[serde(default = "default_word_right")]
    pub word_right: String,
    #[serde(default = "default_field_grow")]
    pub field_grow: String,
    #[serde(default = "default_field_shrink")]
    pub field_shrink: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_highlight_fg")]
    pub highlight_fg: String,
    #[serde(default = "default_muted")]
    pub muted: String,
}

impl Default for Config {
    fn default() -> Self {
        let mut themes = HashMap::new();

        // Example custom theme so users can see how to define their own
        themes.insert(
            "lightblue".to_string(),
            Theme {
                fg: "cyan".to_string(),
                bg: "black".to_string(),
                highlight_bg: "blue".to_string(),
                highlight_fg: "white".to_string(),
                muted: "gray".to_string(),
            },
        );

        Self {
            storage_backend: default_storage_backend(),
            data_path: String::new(),
            catalog_path: String::new(),
            api_base_url: default_api_base_url(),
            proxy_host: default_proxy_host(),
            proxy_port: default_proxy_port(),
            sidebar_width_percent: default_sidebar_width(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes,
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            toggle_sidebar: default_toggle_sidebar(),
            new: default_new(),
            edit: default_edit(),
            save: default_save(),
            delete: default_delete(),
            search: default_search(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            help: default_help(),
            filter: default_filter(),
            enrich: default_enrich(),
            yank_code: default_yank_code(),
            yank_url: default_yank_url(),
            word_left: default_word_left(),
            word_right: default_word_right(),
            field_grow: default_field_grow(),
            field_shrink: default_field_shrink(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: default_highlight_fg(),
            muted: default_muted(),
        }
    }
}

impl Theme {
    /// Preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();

        themes.insert(
            "default".to_string(),
            Theme {
                fg: "white".to_string(),
                bg: "black".to_string(),
                highlight_bg: "blue".to_string(),
                highlight_fg: "white".to_string(),
                muted: "gray".to_string(),
            },
        );

        themes.insert(
            "light".to_string(),
            Theme {
                fg: "black".to_string(),
                bg: "white".to_string(),
                highlight_bg: "blue".to_string(),
                highlight_fg: "white".to_string(),
                muted: "gray".to_string(),
            },
        );

        themes.insert(
            "green".to_string(),
            Theme {
                fg: "green".to_string(),
                bg: "black".to_string(),
                highlight_bg: "yellow".to_string(),
                highlight_fg: "black".to_string(),
                muted: "gray".to_string(),
            },
        );

        themes
    }
}

// Default value functions
fn default_storage_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_api_base_url() -> String {
    crate::remote::DEFAULT_API_BASE.to_string()
}

fn default_proxy_host() -> String {
    "127.0.0.1".to_string()
}

fn default_proxy_port() -> u16 {
    3000
}

fn default_sidebar_width() -> u16 {
    30
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_toggle_sidebar() -> String {
    "b".to_string()
}

fn default_new() -> String {
    "n".to_string()
}

fn default_edit() -> String {
    "e".to_string()
}

fn default_save() -> String {
    "Ctrl+s".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_search() -> String {
    "/".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_filter() -> String {
    "f".to_string()
}

fn default_enrich() -> String {
    "g".to_string()
}

fn default_yank_code() -> String {
    "y".to_string()
}

fn default_yank_url() -> String {
    "u".to_string()
}

fn default_word_left() -> String {
    "Ctrl+Left".to_string()
}

fn default_word_right() -> String {
    "Ctrl+Right".to_string()
}

fn default_field_grow() -> String {
    "Ctrl+Down".to_string()
}

fn default_field_shrink() -> String {
    "Ctrl+Up".to_string()
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_highlight_fg() -> String {
    "white".to_string()
}

fn default_muted() -> String {
    "gray".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Load configuration from file, or create default if missing.
    /// Uses the provided profile to determine config and data paths.
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            // Create default config and save it
            let mut config = Config::default();
            let save_result = config.save_with_profile(profile);
            if let Err(ref e) = save_result {
                eprintln!("ERROR: Failed to save config file: {}", e);
                eprintln!("Config path: {:?}", config_path);
            }
            save_result?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save_with_profile(&mut self, profile: utils::Profile) -> Result<(), ConfigError> {
        // Ensure config version is set before saving
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        let config_path = Self::get_config_path(profile)?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, toml_string).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile).ok_or_else(|| {
            ConfigError::ConfigDirError("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("config.toml"))
    }

    /// Resolved problems-file path: the configured value with `~` expanded,
    /// or the profile default when unset.
    pub fn get_data_path(&self, profile: utils::Profile) -> PathBuf {
        if self.data_path.is_empty() {
            utils::default_data_file(profile)
        } else {
            utils::expand_path(&self.data_path)
        }
    }

    /// Resolved catalog-snapshot path, same rules as [`Config::get_data_path`].
    pub fn get_catalog_path(&self, profile: utils::Profile) -> PathBuf {
        if self.catalog_path.is_empty() {
            utils::default_catalog_file(profile)
        } else {
            utils::expand_path(&self.catalog_path)
        }
    }

    /// Get the currently active theme.
    /// If highlight_fg is not set (empty string), it is calculated from highlight_bg.
    pub fn get_active_theme(&self) -> Theme {
        use crate::tui::widgets::color::{format_color_for_display, get_contrast_text_color, parse_color};

        let mut theme = if let Some(theme) = self.themes.get(&self.current_theme) {
            theme.clone()
        } else if let Some(theme) = Theme::get_preset_themes().get(&self.current_theme) {
            theme.clone()
        } else {
            Theme::get_preset_themes()
                .get("default")
                .cloned()
                .unwrap_or_default()
        };

        if theme.highlight_fg.is_empty() {
            let highlight_bg_color = parse_color(&theme.highlight_bg);
            let calculated_fg = get_contrast_text_color(highlight_bg_color);
            theme.highlight_fg = format_color_for_display(&calculated_fg);
        }

        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(back.storage_backend, StorageBackend::File);
        assert_eq!(back.api_base_url, config.api_base_url);
        assert_eq!(back.key_bindings.save, "Ctrl+s");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("storage_backend = \"memory\"\n").unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.proxy_port, 3000);
        assert_eq!(config.current_theme, "default");
    }
}
