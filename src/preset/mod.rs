//! Light presets: the saved set of expected lights and their types.
//!
//! A preset file is a JSON object keyed by light transform path:
//!
//! ```json
//! { "|grp|keyLight": { "Type": "spotLight" } }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::scene::Light;
use crate::util::{Error, Result};

/// File extension for preset files.
pub const PRESET_EXTENSION: &str = "lightpreset";

/// Expected state of one light.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetEntry {
    #[serde(rename = "Type")]
    pub light_type: String,
}

impl PresetEntry {
    pub fn new(light_type: impl Into<String>) -> Self {
        Self { light_type: light_type.into() }
    }
}

/// Mapping from light path to expected entry. Iteration is in path order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preset {
    entries: BTreeMap<String, PresetEntry>,
}

impl Preset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset describing the given lights.
    pub fn from_lights(lights: &[Light]) -> Self {
        let mut preset = Self::new();
        for light in lights {
            preset.insert(light.path.clone(), PresetEntry::new(light.light_type.clone()));
        }
        preset
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Insert or replace an entry, returning the previous one.
    pub fn insert(&mut self, path: impl Into<String>, entry: PresetEntry) -> Option<PresetEntry> {
        self.entries.insert(path.into(), entry)
    }

    pub fn remove(&mut self, path: &str) -> Option<PresetEntry> {
        self.entries.remove(path)
    }

    pub fn get(&self, path: &str) -> Option<&PresetEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Entries in preset order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PresetEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A preset together with the file it came from.
///
/// Backs the Load / Unload / Reload / Save / Save As actions.
#[derive(Debug, Default)]
pub struct PresetDocument {
    preset: Preset,
    path: Option<PathBuf>,
}

impl PresetDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a preset file, replacing the current preset.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        self.preset = Preset::from_json(&text)?;
        self.path = Some(path.to_path_buf());
        info!("Loaded preset {} ({} lights)", path.display(), self.preset.len());
        Ok(())
    }

    /// Forget the current preset and its file.
    pub fn unload(&mut self) {
        debug!("Unloading preset");
        self.preset.clear();
        self.path = None;
    }

    /// Re-read the current file from disk.
    pub fn reload(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(Error::NoPresetPath)?;
        self.load(path)
    }

    /// Write the preset back to its file.
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_ref().ok_or(Error::NoPresetPath)?;
        self.write(path)
    }

    /// Write the preset to `path` and make it the current file.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.write(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.preset.to_json()?)?;
        info!("Saved preset {} ({} lights)", path.display(), self.preset.len());
        Ok(())
    }

    /// True once a file has been loaded or saved.
    pub fn is_loaded(&self) -> bool {
        self.path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    pub fn preset_mut(&mut self) -> &mut Preset {
        &mut self.preset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_layout() {
        let preset = Preset::from_json(r#"{"|grp|fillLight": {"Type": "areaLight"}}"#).unwrap();
        assert_eq!(preset.len(), 1);
        assert_eq!(preset.get("|grp|fillLight").unwrap().light_type, "areaLight");

        let json = preset.to_json().unwrap();
        assert!(json.contains("\"Type\""));
    }

    #[test]
    fn test_iteration_in_path_order() {
        let mut preset = Preset::new();
        preset.insert("|b", PresetEntry::new("spotLight"));
        preset.insert("|a", PresetEntry::new("pointLight"));
        let keys: Vec<_> = preset.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["|a", "|b"]);
    }

    #[test]
    fn test_from_lights() {
        let lights = vec![
            Light::new("|key", "|key|keyShape", "spotLight"),
            Light::new("|rim", "|rim|rimShape", "pointLight"),
        ];
        let preset = Preset::from_lights(&lights);
        assert_eq!(preset.len(), 2);
        assert!(preset.contains("|key"));
        assert_eq!(preset.get("|rim").unwrap().light_type, "pointLight");
    }

    #[test]
    fn test_document_save_without_path() {
        let doc = PresetDocument::new();
        assert!(matches!(doc.save(), Err(Error::NoPresetPath)));

        let mut doc = PresetDocument::new();
        assert!(matches!(doc.reload(), Err(Error::NoPresetPath)));
    }

    #[test]
    fn test_document_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets").join("shot.lightpreset");

        let mut doc = PresetDocument::new();
        doc.preset_mut().insert("|key", PresetEntry::new("spotLight"));
        doc.save_as(&path).unwrap();
        assert!(doc.is_loaded());
        assert_eq!(doc.path(), Some(path.as_path()));

        // Edit on disk, then reload picks it up.
        std::fs::write(&path, r#"{"|fill": {"Type": "areaLight"}}"#).unwrap();
        doc.reload().unwrap();
        assert!(doc.preset().contains("|fill"));
        assert!(!doc.preset().contains("|key"));

        doc.unload();
        assert!(!doc.is_loaded());
        assert!(doc.preset().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let mut doc = PresetDocument::new();
        assert!(matches!(doc.load("/nonexistent/x.lightpreset"), Err(Error::Io(_))));
        assert!(!doc.is_loaded());
    }
}
