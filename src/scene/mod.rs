//! Scene-side data: lights and the host query interface.
//!
//! - [`Light`] - A light transform with its shape and type tag
//! - [`SceneHost`] - Queries the host application answers
//! - [`MemoryScene`] - JSON-described host for standalone use

mod host;
mod memory;

pub use host::SceneHost;
pub use memory::{MemoryScene, SceneLightDesc};

/// Separator between hierarchy segments in scene paths.
pub const PATH_DELIMITER: char = '|';

/// Separator shown between segments in display names.
pub const DISPLAY_SEPARATOR: &str = " > ";

/// Human-readable name for a scene path: leading delimiter stripped, the
/// remaining delimiters replaced by `" > "`.
///
/// `"|grp|keyLight"` becomes `"grp > keyLight"`.
pub fn display_name(path: &str) -> String {
    let trimmed = path.strip_prefix(PATH_DELIMITER).unwrap_or(path);
    trimmed.replace(PATH_DELIMITER, DISPLAY_SEPARATOR)
}

/// Parent path, or `None` for a root-level node.
pub fn parent_path(path: &str) -> Option<&str> {
    let idx = path.rfind(PATH_DELIMITER)?;
    let parent = &path[..idx];
    if parent.is_empty() {
        None
    } else {
        Some(parent)
    }
}

/// Last path segment.
pub fn leaf_name(path: &str) -> &str {
    path.rsplit(PATH_DELIMITER).next().unwrap_or(path)
}

/// A light as seen in the scene: its transform path, shape path and type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Light {
    /// Full path of the parent transform; unique key of the light.
    pub path: String,
    /// Full path of the light shape node.
    pub shape: String,
    /// Host type tag (e.g. `spotLight`).
    pub light_type: String,
}

impl Light {
    pub fn new(path: impl Into<String>, shape: impl Into<String>, light_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            shape: shape.into(),
            light_type: light_type.into(),
        }
    }

    pub fn display_name(&self) -> String {
        display_name(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("|grp|keyLight"), "grp > keyLight");
        assert_eq!(display_name("|keyLight"), "keyLight");
        assert_eq!(display_name("keyLight"), "keyLight");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("|grp|keyLight|keyLightShape"), Some("|grp|keyLight"));
        assert_eq!(parent_path("|keyLight"), None);
        assert_eq!(parent_path("keyLight"), None);
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("|grp|keyLight"), "keyLight");
        assert_eq!(leaf_name("keyLight"), "keyLight");
    }
}
