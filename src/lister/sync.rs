//! Scene ↔ preset synchronization.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::preset::{Preset, PresetEntry};
use crate::scene::{Light, SceneHost};
use crate::util::Result;

/// Record every scene light in `preset`, returning how many entries were
/// added or changed.
pub fn scene_to_preset(lights: &[Light], preset: &mut Preset) -> usize {
    let mut changed = 0;
    for light in lights {
        let entry = PresetEntry::new(light.light_type.clone());
        if preset.get(&light.path) != Some(&entry) {
            debug!("Preset <- {} [{}]", light.path, light.light_type);
            preset.insert(light.path.clone(), entry);
            changed += 1;
        }
    }
    info!("Scene -> Preset: {} entries changed", changed);
    changed
}

/// Create every preset light that is absent from `lights`, returning the new
/// shape paths.
pub fn preset_to_scene(preset: &Preset, lights: &[Light], host: &mut dyn SceneHost) -> Result<Vec<String>> {
    let existing: HashSet<&str> = lights.iter().map(|l| l.path.as_str()).collect();
    let mut created = Vec::new();
    for (path, entry) in preset.iter() {
        if existing.contains(path) {
            continue;
        }
        let shape = host.create_light(path, &entry.light_type)?;
        debug!("Scene <- {} [{}]", shape, entry.light_type);
        created.push(shape);
    }
    info!("Preset -> Scene: {} lights created", created.len());
    Ok(created)
}
