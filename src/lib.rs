//! # Light Lister
//!
//! Lists the lights of a 3D scene, compares them against a saved light
//! preset and shows a status icon per light.
//!
//! ## Modules
//!
//! - [`util`] - Errors
//! - [`scene`] - Lights, scene paths and the [`SceneHost`](scene::SceneHost) query trait
//! - [`preset`] - Light presets and preset files
//! - [`status`] - Light status with severity ordering
//! - [`icons`] - Status glyph rendering and the decoded-icon cache
//! - [`lister`] - Scene query, scene/preset diff and sync
//! - [`table`] - Table cells, sorting, filtering and the row model
//! - [`settings`] - Persistent user settings
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use light_lister::prelude::*;
//!
//! let scene = MemoryScene::load("scene.json")?;
//! let mut preset = PresetDocument::new();
//! preset.load("shot.lightpreset")?;
//!
//! let icons = Arc::new(IconCache::new("Icons"));
//! let mut lister = LightLister::default();
//! lister.refresh(&scene)?;
//!
//! let mut table = LightTable::new(icons);
//! table.populate(lister.rows(preset.preset()));
//! table.apply_filter("key");
//! for (_, row) in table.visible_rows() {
//!     println!("{} {}", row.row.status, row.row.display_name);
//! }
//! ```

pub mod util;
pub mod scene;
pub mod preset;
pub mod status;
pub mod icons;
pub mod lister;
pub mod table;
pub mod settings;

// Light list panel (optional, enabled with "viewer" feature)
#[cfg(feature = "viewer")]
pub mod viewer;

// Re-export commonly used types
pub use util::{Error, Result};
pub use status::Status;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result};
    pub use crate::scene::{Light, MemoryScene, SceneHost};
    pub use crate::preset::{Preset, PresetDocument, PresetEntry};
    pub use crate::status::Status;
    pub use crate::icons::{Icon, IconCache, IconKind};
    pub use crate::lister::{compute_rows, DiffMode, LightLister, Row};
    pub use crate::table::{apply_filter, compare_cells, CellContent, Column, LightTable, SortOrder};
    pub use crate::settings::Settings;
}
