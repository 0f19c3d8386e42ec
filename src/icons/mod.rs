//! Status icons: vector glyphs rendered to disk and a decoded-icon cache.
//!
//! - [`IconKind`] - The four status glyphs
//! - [`IconDrawing`] - Stroke geometry and SVG serialization
//! - [`IconCache`] / [`Icon`] - Lazily decoded, fixed-width raster icons

mod cache;
mod kind;
mod render;

pub use cache::{Icon, IconCache, DEFAULT_ICON_SCALE, FALLBACK_ICON_NAME};
pub use kind::IconKind;
pub use render::{render, IconDrawing, Stroke, CANVAS_SIZE};
