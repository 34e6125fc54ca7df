/// Engine configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "pad-session";
const FILE_NAME: &str = "pad-session.json";

/// Size guards and highlighting for the side-by-side diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffSection {
    /// Combined line count of both inputs above which no diff is computed.
    pub max_lines: usize,
    /// Changed-line count above which the diff is abandoned.
    pub max_edit_distance: usize,
    pub inline_highlights: bool,
    /// Lines longer than this many chars get no char-level highlights.
    pub inline_max_line_chars: usize,
}

impl Default for DiffSection {
    fn default() -> Self {
        Self {
            max_lines: 200_000,
            max_edit_distance: 20_000,
            inline_highlights: true,
            inline_max_line_chars: 1_000,
        }
    }
}

/// Default find / replace flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    pub case_sensitive: bool,
    pub whole_word: bool,
    /// Whether find-next continues from the top after reaching the end.
    pub wrap: bool,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            wrap: true,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub diff: DiffSection,
    pub search: SearchSection,
    /// `tracing_subscriber` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            diff: DiffSection::default(),
            search: SearchSection::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Returns the config file path: user config directory + `pad-session/pad-session.json`.
    ///
    /// Falls back to `pad-session.json` in the working directory when the platform
    /// has no config directory.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<EngineConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Broken files are left alone.
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e:#}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing config")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
    }

    /// Clamps limits to usable minimums and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.diff.max_lines = self.diff.max_lines.max(2);
        self.diff.max_edit_distance = self.diff.max_edit_distance.max(1);
        self.diff.inline_max_line_chars = self.diff.inline_max_line_chars.max(1);

        if self.log_filter.trim().is_empty() {
            self.log_filter = "info".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.diff.max_lines, 200_000);
        assert_eq!(config.diff.max_edit_distance, 20_000);
        assert!(config.diff.inline_highlights);
        assert!(!config.search.case_sensitive);
        assert!(!config.search.whole_word);
        assert!(config.search.wrap);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_sanitize_raises_zero_limits() {
        let mut config = EngineConfig::default();
        config.diff.max_lines = 0;
        config.diff.max_edit_distance = 0;
        config.diff.inline_max_line_chars = 0;
        config.sanitize();
        assert_eq!(config.diff.max_lines, 2);
        assert_eq!(config.diff.max_edit_distance, 1);
        assert_eq!(config.diff.inline_max_line_chars, 1);
    }

    #[test]
    fn test_sanitize_keeps_valid_limits() {
        let mut config = EngineConfig::default();
        config.diff.max_edit_distance = 50;
        config.sanitize();
        assert_eq!(config.diff.max_edit_distance, 50);
    }

    #[test]
    fn test_sanitize_resets_blank_log_filter() {
        let mut config = EngineConfig::default();
        config.log_filter = "   ".to_string();
        config.sanitize();
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_config_path_file_name() {
        let path = EngineConfig::config_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(FILE_NAME));
    }

    #[test]
    fn test_serde_round_trip() {
        let mut config = EngineConfig::default();
        config.search.whole_word = true;
        config.log_filter = "pad_session_core=debug".to_string();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
