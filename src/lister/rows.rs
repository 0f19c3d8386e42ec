//! Scene/preset diff producing display rows.

use std::collections::HashSet;

use crate::preset::Preset;
use crate::scene::{display_name, Light};
use crate::status::Status;

/// How scene lights are reconciled against the preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiffMode {
    /// Scene lights are Found (Outdated on a type mismatch); preset entries
    /// absent from the scene are listed as Add.
    #[default]
    Reconcile,
    /// Behavior of the first release: every scene light is Found, preset
    /// entries that *are* in the scene are appended again as Undefined, and
    /// absent entries are not shown.
    Legacy,
}

/// One materialized table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Light transform path (row key).
    pub path: String,
    pub display_name: String,
    pub light_type: String,
    pub status: Status,
    /// Shape path when the light exists in the scene.
    pub shape: Option<String>,
}

impl Row {
    fn from_light(light: &Light, status: Status) -> Self {
        Self {
            path: light.path.clone(),
            display_name: light.display_name(),
            light_type: light.light_type.clone(),
            status,
            shape: Some(light.shape.clone()),
        }
    }

    fn from_preset(path: &str, light_type: &str, status: Status) -> Self {
        Self {
            path: path.to_string(),
            display_name: display_name(path),
            light_type: light_type.to_string(),
            status,
            shape: None,
        }
    }

    /// True if the light exists in the scene.
    pub fn in_scene(&self) -> bool {
        self.shape.is_some()
    }
}

/// Classify scene lights against `preset`.
///
/// Scene rows come first in scene order, followed by preset-derived rows in
/// preset order. Neither input is modified.
pub fn compute_rows(lights: &[Light], preset: &Preset, mode: DiffMode) -> Vec<Row> {
    let scene_paths: HashSet<&str> = lights.iter().map(|l| l.path.as_str()).collect();

    match mode {
        DiffMode::Reconcile => {
            let mut rows: Vec<Row> = lights
                .iter()
                .map(|light| {
                    let status = match preset.get(&light.path) {
                        Some(entry) if entry.light_type != light.light_type => Status::Outdated,
                        _ => Status::Found,
                    };
                    Row::from_light(light, status)
                })
                .collect();
            rows.extend(
                preset
                    .iter()
                    .filter(|(path, _)| !scene_paths.contains(path))
                    .map(|(path, entry)| Row::from_preset(path, &entry.light_type, Status::Add)),
            );
            rows
        }
        DiffMode::Legacy => {
            let mut rows: Vec<Row> = lights
                .iter()
                .map(|light| Row::from_light(light, Status::Found))
                .collect();
            rows.extend(
                preset
                    .iter()
                    .filter(|(path, _)| scene_paths.contains(path))
                    .map(|(path, entry)| Row::from_preset(path, &entry.light_type, Status::Undefined)),
            );
            rows
        }
    }
}
