//! In-memory scene host backed by a JSON description.
//!
//! ```json
//! { "lights": [ { "shape": "|grp|keyLight|keyLightShape", "type": "spotLight" } ] }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{leaf_name, parent_path, SceneHost};
use crate::util::{Error, Result};

/// One light shape in a scene description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneLightDesc {
    pub shape: String,
    #[serde(rename = "type")]
    pub light_type: String,
}

/// Ordered list of light shapes acting as a scene host.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryScene {
    #[serde(default)]
    lights: Vec<SceneLightDesc>,
    #[serde(skip)]
    script_dir: Option<PathBuf>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a scene description.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a scene description file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Write the scene description as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Report `dir` as the host's per-user script directory.
    pub fn with_script_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.script_dir = Some(dir.into());
        self
    }

    /// Append a light shape. Existing shapes keep their position and get
    /// the new type.
    pub fn add_light(&mut self, shape: impl Into<String>, light_type: impl Into<String>) {
        let shape = shape.into();
        let light_type = light_type.into();
        match self.lights.iter_mut().find(|l| l.shape == shape) {
            Some(existing) => existing.light_type = light_type,
            None => self.lights.push(SceneLightDesc { shape, light_type }),
        }
    }

    /// Remove a light shape.
    pub fn remove_light(&mut self, shape: &str) -> Result<()> {
        let before = self.lights.len();
        self.lights.retain(|l| l.shape != shape);
        if self.lights.len() == before {
            return Err(Error::LightNotFound(shape.to_string()));
        }
        Ok(())
    }

    pub fn lights(&self) -> &[SceneLightDesc] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

impl SceneHost for MemoryScene {
    fn light_shapes(&self) -> Result<Vec<String>> {
        Ok(self.lights.iter().map(|l| l.shape.clone()).collect())
    }

    fn parent_transform(&self, shape: &str) -> Option<String> {
        parent_path(shape).map(str::to_string)
    }

    fn light_type(&self, shape: &str) -> Option<String> {
        self.lights
            .iter()
            .find(|l| l.shape == shape)
            .map(|l| l.light_type.clone())
    }

    fn user_script_dir(&self) -> Option<PathBuf> {
        self.script_dir.clone()
    }

    fn create_light(&mut self, transform: &str, light_type: &str) -> Result<String> {
        let shape = format!("{}{}{}Shape", transform, super::PATH_DELIMITER, leaf_name(transform));
        if self.lights.iter().any(|l| l.shape == shape) {
            return Err(Error::other(format!("light {} already exists", shape)));
        }
        self.lights.push(SceneLightDesc {
            shape: shape.clone(),
            light_type: light_type.to_string(),
        });
        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "lights": [
            { "shape": "|grp|keyLight|keyLightShape", "type": "spotLight" },
            { "shape": "|rimLightShape", "type": "pointLight" }
        ]
    }"#;

    #[test]
    fn test_from_json() {
        let scene = MemoryScene::from_json(SCENE).unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(
            scene.light_shapes().unwrap(),
            vec!["|grp|keyLight|keyLightShape", "|rimLightShape"]
        );
        assert_eq!(scene.light_type("|rimLightShape").as_deref(), Some("pointLight"));
        assert_eq!(scene.light_type("|nope"), None);
    }

    #[test]
    fn test_parent_transform() {
        let scene = MemoryScene::from_json(SCENE).unwrap();
        assert_eq!(
            scene.parent_transform("|grp|keyLight|keyLightShape").as_deref(),
            Some("|grp|keyLight")
        );
        assert_eq!(scene.parent_transform("|rimLightShape"), None);
    }

    #[test]
    fn test_create_light() {
        let mut scene = MemoryScene::new();
        let shape = scene.create_light("|grp|fillLight", "areaLight").unwrap();
        assert_eq!(shape, "|grp|fillLight|fillLightShape");
        assert_eq!(scene.light_type(&shape).as_deref(), Some("areaLight"));
        assert!(scene.create_light("|grp|fillLight", "areaLight").is_err());
    }

    #[test]
    fn test_add_and_remove() {
        let mut scene = MemoryScene::new();
        scene.add_light("|a|aShape", "spotLight");
        scene.add_light("|a|aShape", "pointLight");
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.light_type("|a|aShape").as_deref(), Some("pointLight"));

        scene.remove_light("|a|aShape").unwrap();
        assert!(scene.is_empty());
        assert!(matches!(scene.remove_light("|a|aShape"), Err(Error::LightNotFound(_))));
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let scene = MemoryScene::from_json(SCENE).unwrap();
        scene.save(&path).unwrap();

        let loaded = MemoryScene::load(&path).unwrap();
        assert_eq!(loaded.lights(), scene.lights());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(MemoryScene::from_json("{\"lights\": 3}"), Err(Error::Json(_))));
    }
}
