//! Persistent application settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::icons::DEFAULT_ICON_SCALE;
use crate::lister::DiffMode;

/// Environment variable overriding the icon directory.
pub const ICON_DIR_ENV: &str = "LIGHT_LISTER_ICON_DIR";

/// Icon directory below the host script directory.
const ICON_SUBDIR: [&str; 2] = ["LightLister", "Icons"];

/// Application settings that persist between sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window
    pub window_width: f32,
    pub window_height: f32,

    // UI layout
    pub attribute_panel_width: f32,

    // Icons
    pub icon_dir: Option<PathBuf>,
    pub icon_scale: u32,

    // Diff
    pub legacy_diff: bool,

    // Last opened files
    pub last_scene: Option<PathBuf>,
    pub last_preset: Option<PathBuf>,

    // Recent presets (most recent first, max 10)
    pub recent_presets: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 600.0,
            window_height: 550.0,
            attribute_panel_width: 200.0,
            icon_dir: None,
            icon_scale: DEFAULT_ICON_SCALE,
            legacy_diff: false,
            last_scene: None,
            last_preset: None,
            recent_presets: Vec::new(),
        }
    }
}

const MAX_RECENT_PRESETS: usize = 10;

impl Settings {
    /// Get settings file path
    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("light-lister");
            std::fs::create_dir_all(&p).ok();
            p.push("settings.json");
            p
        })
    }

    /// Load settings from file
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load settings from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let mut settings: Self = std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        if settings.icon_scale == 0 {
            settings.icon_scale = DEFAULT_ICON_SCALE;
        }

        settings
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = Self::path() {
            self.save_to(&path);
        }
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            if let Err(e) = std::fs::write(path, json) {
                tracing::warn!("Cannot save settings to {}: {}", path.display(), e);
            }
        }
    }

    /// Add preset to recent list (moves to top if already present)
    pub fn add_recent_preset(&mut self, path: PathBuf) {
        self.recent_presets.retain(|p| p != &path);
        self.recent_presets.insert(0, path.clone());
        self.recent_presets.truncate(MAX_RECENT_PRESETS);
        self.last_preset = Some(path);
    }

    /// Get recent presets (filters out non-existent)
    pub fn recent_presets(&self) -> Vec<&PathBuf> {
        self.recent_presets.iter().filter(|p| p.exists()).collect()
    }

    pub fn diff_mode(&self) -> DiffMode {
        if self.legacy_diff {
            DiffMode::Legacy
        } else {
            DiffMode::Reconcile
        }
    }

    /// Resolve the icon directory: setting, environment, host script
    /// directory, then the per-user data directory.
    pub fn icon_dir(&self, host_script_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = &self.icon_dir {
            return dir.clone();
        }
        if let Some(dir) = std::env::var_os(ICON_DIR_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }
        if let Some(dir) = host_script_dir {
            return ICON_SUBDIR.iter().fold(dir.to_path_buf(), |p, s| p.join(s));
        }
        dirs::data_local_dir()
            .map(|p| p.join("light-lister").join("Icons"))
            .unwrap_or_else(|| PathBuf::from("Icons"))
    }
}
