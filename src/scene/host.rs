//! Host application query interface.

use std::path::PathBuf;

use crate::util::{Error, Result};

/// Queries the lister needs from the host application.
///
/// Paths are full hierarchical paths using [`PATH_DELIMITER`](super::PATH_DELIMITER).
pub trait SceneHost {
    /// Full paths of every light shape, in host enumeration order.
    fn light_shapes(&self) -> Result<Vec<String>>;

    /// Full path of the transform parenting `shape`.
    fn parent_transform(&self, shape: &str) -> Option<String>;

    /// Type tag of a light shape.
    fn light_type(&self, shape: &str) -> Option<String>;

    /// Per-user script directory, used to place the icon directory.
    fn user_script_dir(&self) -> Option<PathBuf> {
        None
    }

    /// Host warning sink.
    fn warn(&self, message: &str) {
        tracing::warn!(target: "host", "{}", message);
    }

    /// Create a light of `light_type` under a new transform at `transform`,
    /// returning the shape path.
    fn create_light(&mut self, transform: &str, light_type: &str) -> Result<String> {
        let _ = light_type;
        Err(Error::Unsupported(format!("cannot create light {}", transform)))
    }
}
