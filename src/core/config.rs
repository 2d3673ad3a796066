//! Application configuration management

use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recently opened files, most recent first
    pub recent_files: Vec<PathBuf>,
    /// Root directory shown in the Explore tab
    pub explorer_root: Option<PathBuf>,
    /// Editor settings
    pub editor: EditorConfig,
    /// UI settings
    pub ui: UiConfig,
}

/// Editor-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font family: "monospace" or "proportional"
    pub font_family: String,
    /// Font size in pixels
    pub font_size: f32,
    /// Word wrap
    pub word_wrap: bool,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme (light/dark)
    pub theme: String,
    /// Sidebar width
    pub sidebar_width: f32,
    /// Font size for sidebar labels
    pub sidebar_font_size: f32,
    /// Whether the sidebar is shown
    pub sidebar_visible: bool,
    /// Whether the status bar is shown
    pub status_bar_visible: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recent_files: Vec::new(),
            explorer_root: None,
            editor: EditorConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_family: "monospace".to_string(),
            font_size: 14.0,
            word_wrap: true,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            sidebar_width: 250.0,
            sidebar_font_size: 13.0,
            sidebar_visible: true,
            status_bar_visible: true,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "studymate", "StudyMate")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::debug!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Add a file to the recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(10);
    }

    /// True when the dark theme is active
    pub fn is_dark_theme(&self) -> bool {
        self.ui.theme == "dark"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_files_dedup_and_cap() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            config.add_recent_file(PathBuf::from(format!("/notes/{i}.md")));
        }
        config.add_recent_file(PathBuf::from("/notes/5.md"));

        assert_eq!(config.recent_files.len(), 10);
        assert_eq!(config.recent_files[0], PathBuf::from("/notes/5.md"));
        assert_eq!(
            config
                .recent_files
                .iter()
                .filter(|p| **p == PathBuf::from("/notes/5.md"))
                .count(),
            1
        );
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.ui.theme, "light");
        assert_eq!(config.editor.font_size, 14.0);
        assert!(config.editor.word_wrap);
    }
}
