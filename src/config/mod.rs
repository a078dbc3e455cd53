//! Configuration for the documentation viewer
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/shipdocs/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod timing;

#[cfg(test)]
mod tests;

pub use observability::{FileLogging, LogRotation, LoggingConfig};
pub use timing::{FileTiming, TimingConfig};

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Color theme: "dark" or "light"
    pub theme: String,

    /// Section to scroll to once content is ready (None = top of document)
    pub start_section: Option<String>,

    /// Terminal width below which the sidebar becomes a toggleable drawer
    pub compact_width: u16,

    /// Show the system log strip at startup
    pub show_logs: bool,

    /// Durations for timed UI transitions
    pub timing: TimingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            start_section: None,
            compact_width: 100,
            show_logs: false,
            timing: TimingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub start_section: Option<String>,
    pub compact_width: Option<u16>,
    pub show_logs: Option<bool>,

    /// Optional [timing] section
    pub timing: Option<FileTiming>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/shipdocs/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("shipdocs").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read and parse a config file. A missing file yields defaults.
    fn load_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    /// Load configuration: env vars -> file -> defaults
    ///
    /// A config file that exists but does not parse is an error.
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::load_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with environment overrides
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Theme: env > file > default
        let theme = env("SHIPDOCS_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        // Start section: env > file > none
        let start_section = env("SHIPDOCS_START_SECTION")
            .or(file.start_section)
            .filter(|s| !s.trim().is_empty());

        let compact_width = env("SHIPDOCS_COMPACT_WIDTH")
            .and_then(|v| v.parse().ok())
            .or(file.compact_width)
            .unwrap_or(defaults.compact_width);

        let show_logs = file.show_logs.unwrap_or(defaults.show_logs);

        let mut timing = TimingConfig::from_file(file.timing);
        if let Some(ms) = env("SHIPDOCS_LOAD_DELAY_MS").and_then(|v| v.parse().ok()) {
            timing.load_delay_ms = ms;
        }

        // Logging: file config only (RUST_LOG env var handled in main.rs)
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            theme,
            start_section,
            compact_width,
            show_logs,
            timing,
            logging,
        }
    }

    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let start_section = match &self.start_section {
            Some(id) => format!("start_section = {}", toml_string(id)),
            None => "# start_section = \"k8s-basics\"".to_string(),
        };

        format!(
            r#"# shipdocs configuration

# Theme: dark, light
theme = {theme}

# Section to open once content is ready
{start_section}

# Below this terminal width the sidebar becomes a drawer (toggle with 'm')
compact_width = {compact_width}

# Show the system log strip at startup (toggle with 'L')
show_logs = {show_logs}

[timing]
load_delay_ms = {load_delay}
ack_window_ms = {ack_window}
tick_ms = {tick}

# Logging configuration (RUST_LOG env var overrides level)
[logging]
level = {log_level}
file_enabled = {file_enabled}
file_dir = {file_dir}
file_rotation = {file_rotation}
file_prefix = {file_prefix}
"#,
            theme = toml_string(&self.theme),
            start_section = start_section,
            compact_width = self.compact_width,
            show_logs = self.show_logs,
            load_delay = self.timing.load_delay_ms,
            ack_window = self.timing.ack_window_ms,
            tick = self.timing.tick_ms,
            log_level = toml_string(&self.logging.level),
            file_enabled = self.logging.file_enabled,
            file_dir = toml_string(&self.logging.file_dir.to_string_lossy()),
            file_rotation = toml_string(self.logging.file_rotation.as_str()),
            file_prefix = toml_string(&self.logging.file_prefix),
        )
    }
}

/// A string as a TOML value, quoted and escaped
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
