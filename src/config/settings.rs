//! Configuration settings for parlaywatch.

use crate::betting::RowClass;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix of environment variable overrides, e.g. `PARLAYWATCH__FEED__TIMEOUT_SECS`.
const ENV_PREFIX: &str = "PARLAYWATCH";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Score feed configuration.
    pub feed: FeedConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
    /// Theme configuration.
    pub theme: ThemeConfig,
}

impl Config {
    /// Load configuration from the default location, writing the defaults
    /// there first when no file exists yet.
    pub fn load_or_init() -> crate::Result<Self> {
        let path = default_path();
        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save(Some(path.clone())) {
                tracing::warn!(path = %path.display(), error = %e, "could not write default config");
            }
        }
        Self::load(Some(path))
    }

    /// Load configuration from file, layered under environment overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_path);
        Self::from_sources(&config_path, true)
    }

    fn from_sources(path: &Path, with_env: bool) -> crate::Result<Self> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::File::from(path.to_path_buf()).required(false));
        if with_env {
            builder = builder.add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        builder
            .build()
            .and_then(::config::Config::try_deserialize)
            .map_err(|e| crate::Error::config(e.to_string()))
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn default_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Score feed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Scores endpoint; the event id is appended as the last path segment.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://services.bovada.lv/services/sports/results/api/v1/scores"
                .to_string(),
            timeout_secs: 10,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// Show status bar.
    pub show_status_bar: bool,
    /// Show help bar.
    pub show_help_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_support: true,
            show_status_bar: true,
            show_help_bar: true,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Previous entry column.
    pub left: String,
    /// Next entry column.
    pub right: String,
    /// Edit the selected field.
    pub edit: String,
    /// Cancel/back.
    pub back: String,
    /// Switch between the entry and parlay panes.
    pub focus: String,
    /// Add a pending bet.
    pub add_entry: String,
    /// Remove the selected bet or parlay.
    pub remove: String,
    /// Flip the home flag of the selected bet.
    pub toggle_home: String,
    /// Commit pending bets as a parlay.
    pub commit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            left: "h".to_string(),
            right: "l".to_string(),
            edit: "Enter".to_string(),
            back: "Esc".to_string(),
            focus: "Tab".to_string(),
            add_entry: "a".to_string(),
            remove: "d".to_string(),
            toggle_home: "Space".to_string(),
            commit: "c".to_string(),
        }
    }
}

/// Theme configuration.
///
/// Colors are ratatui color names (`green`, `lightred`) or hex (`#66bb6a`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Finished and won.
    pub won: String,
    /// Live and ahead.
    pub winning: String,
    /// Finished and lost.
    pub lost: String,
    /// Live and behind.
    pub losing: String,
    /// Level, or not started.
    pub tied: String,
    /// Accent color for titles and the focused pane.
    pub accent: String,
    /// Border color.
    pub border: String,
    /// Selection/highlight color.
    pub selection: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            won: "green".to_string(),
            winning: "green".to_string(),
            lost: "red".to_string(),
            losing: "red".to_string(),
            tied: "yellow".to_string(),
            accent: "cyan".to_string(),
            border: "darkgray".to_string(),
            selection: "#585b70".to_string(),
        }
    }
}

impl ThemeConfig {
    /// Foreground color of a bet row.
    pub fn row_color(&self, class: RowClass) -> Color {
        let name = match class {
            RowClass::Won => &self.won,
            RowClass::Winning => &self.winning,
            RowClass::Lost => &self.lost,
            RowClass::Losing => &self.losing,
            RowClass::Tied => &self.tied,
        };
        parse_color(name)
    }

    pub fn accent(&self) -> Color {
        parse_color(&self.accent)
    }

    pub fn border(&self) -> Color {
        parse_color(&self.border)
    }

    pub fn selection(&self) -> Color {
        parse_color(&self.selection)
    }
}

/// Unknown colors fall back to the terminal default.
fn parse_color(name: &str) -> Color {
    Color::from_str(name.trim()).unwrap_or(Color::Reset)
}
