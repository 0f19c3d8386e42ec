//! Scene query and scene/preset diff.
//!
//! - [`LightLister`] - Collects lights from a [`SceneHost`]
//! - [`compute_rows`] / [`DiffMode`] - Classify lights against a preset
//! - [`scene_to_preset`] / [`preset_to_scene`] - Sync in either direction

mod rows;
mod sync;

pub use rows::{compute_rows, DiffMode, Row};
pub use sync::{preset_to_scene, scene_to_preset};

use tracing::{debug, info_span};

use crate::preset::Preset;
use crate::scene::{Light, SceneHost};
use crate::util::Result;

/// Type tag used when the host cannot report one.
pub const UNKNOWN_LIGHT_TYPE: &str = "light";

/// Holds the most recent scene light list and the diff mode.
#[derive(Debug, Default)]
pub struct LightLister {
    mode: DiffMode,
    lights: Vec<Light>,
}

impl LightLister {
    pub fn new(mode: DiffMode) -> Self {
        Self { mode, lights: Vec::new() }
    }

    pub fn mode(&self) -> DiffMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DiffMode) {
        self.mode = mode;
    }

    /// Re-query the host for every light and its parent transform.
    pub fn refresh(&mut self, host: &dyn SceneHost) -> Result<&[Light]> {
        let _span = info_span!("refresh_lights").entered();
        self.lights = collect_lights(host)?;
        debug!("Scene has {} lights", self.lights.len());
        Ok(&self.lights)
    }

    /// Lights from the last refresh, in host order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Rows for the last refreshed lights against `preset`.
    pub fn rows(&self, preset: &Preset) -> Vec<Row> {
        compute_rows(&self.lights, preset, self.mode)
    }
}

/// Query the host for all lights.
///
/// A shape without a parent transform is reported through the host's
/// warning sink and listed under its own path.
pub fn collect_lights(host: &dyn SceneHost) -> Result<Vec<Light>> {
    let shapes = host.light_shapes()?;
    let mut lights = Vec::with_capacity(shapes.len());
    for shape in shapes {
        let path = match host.parent_transform(&shape) {
            Some(parent) => parent,
            None => {
                host.warn(&format!("{} has no parent transform", shape));
                shape.clone()
            }
        };
        let light_type = host
            .light_type(&shape)
            .unwrap_or_else(|| UNKNOWN_LIGHT_TYPE.to_string());
        lights.push(Light { path, shape, light_type });
    }
    Ok(lights)
}
