//! Process-wide status icon cache.
//!
//! Icons are decoded from the icon directory on first request, scaled to a
//! fixed width and kept for the life of the cache. A file name is decoded at
//! most once; concurrent callers race on the write lock, and the loser reuses
//! the winner's entry.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use image::imageops::FilterType;
use image::RgbaImage;
use parking_lot::{Mutex, RwLock};
use resvg::{tiny_skia, usvg};
use tracing::{debug, warn};

use super::render::{self, IconDrawing};
use super::IconKind;
use crate::status::Status;
use crate::util::{Error, Result};

/// Default icon width in pixels.
pub const DEFAULT_ICON_SCALE: u32 = 20;

/// Name carried by the fallback icon.
pub const FALLBACK_ICON_NAME: &str = "unknown";

/// Immutable, cheaply cloneable raster icon.
#[derive(Clone, Debug)]
pub struct Icon {
    name: String,
    image: Arc<RgbaImage>,
}

impl Icon {
    fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image: Arc::new(image),
        }
    }

    /// File name the icon was loaded from, or [`FALLBACK_ICON_NAME`].
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Straight (non-premultiplied) RGBA pixels, row-major.
    pub fn rgba(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// True if both handles share the same decoded pixels.
    pub fn same_image(&self, other: &Icon) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }

    pub fn is_fallback(&self) -> bool {
        self.name == FALLBACK_ICON_NAME
    }
}

/// Decoded icon store keyed by file name.
///
/// One instance is created at startup and shared (`Arc<IconCache>`) by every
/// component that displays icons.
pub struct IconCache {
    dir: PathBuf,
    scale: u32,
    loaded: RwLock<HashMap<String, Icon>>,
    /// Names already reported missing, so repeated lookups log once.
    missing: Mutex<HashSet<String>>,
    decodes: AtomicUsize,
    required_checked: AtomicBool,
    fallback: Icon,
}

impl IconCache {
    /// Create a cache for `dir` with the default icon width.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_scale(dir, DEFAULT_ICON_SCALE)
    }

    /// Create a cache producing icons `scale` pixels wide.
    pub fn with_scale(dir: impl Into<PathBuf>, scale: u32) -> Self {
        let scale = scale.max(1);
        let fallback_svg = IconDrawing::fallback().to_svg();
        let fallback = rasterize_svg(fallback_svg.as_bytes(), scale)
            .unwrap_or_else(|_| RgbaImage::new(scale, scale));

        Self {
            dir: dir.into(),
            scale,
            loaded: RwLock::new(HashMap::new()),
            missing: Mutex::new(HashSet::new()),
            decodes: AtomicUsize::new(0),
            required_checked: AtomicBool::new(false),
            fallback: Icon::new(FALLBACK_ICON_NAME, fallback),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Icon width in pixels.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Whether [`ensure_required`](Self::ensure_required) has run.
    pub fn required_checked(&self) -> bool {
        self.required_checked.load(Ordering::Acquire)
    }

    /// Make sure every status glyph exists on disk.
    ///
    /// A missing directory is created and all glyphs are rendered; otherwise
    /// only missing files are rendered. Returns the glyphs that were written.
    pub fn ensure_required(&self) -> Result<Vec<IconKind>> {
        self.required_checked.store(true, Ordering::Release);

        if !self.dir.exists() {
            warn!("Icon directory {} missing, rendering all icons", self.dir.display());
            std::fs::create_dir_all(&self.dir)?;
            self.render_all()?;
            return Ok(IconKind::REQUIRED.to_vec());
        }

        let mut rendered = Vec::new();
        for kind in IconKind::REQUIRED {
            if !self.dir.join(kind.file_name()).exists() {
                render::render(kind, &self.dir)?;
                rendered.push(kind);
            }
        }
        Ok(rendered)
    }

    /// Unconditionally re-render every glyph file.
    ///
    /// Already decoded icons stay cached; the new files are picked up by a
    /// fresh cache.
    pub fn render_all(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        for kind in IconKind::REQUIRED {
            render::render(kind, &self.dir)?;
        }
        Ok(())
    }

    /// Icon for a status glyph, or the fallback if it cannot be loaded.
    pub fn icon(&self, kind: IconKind) -> Icon {
        self.load(kind.file_name())
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// Icon for a status. `Undefined` maps to the fallback.
    pub fn status_icon(&self, status: Status) -> Icon {
        match status.icon() {
            Some(kind) => self.icon(kind),
            None => self.fallback.clone(),
        }
    }

    /// Icon by file name relative to the icon directory (absolute paths are
    /// used as-is). SVG files are rasterized, anything else goes through the
    /// image decoder.
    pub fn icon_by_name(&self, name: &str) -> Icon {
        if name.is_empty() {
            return self.fallback.clone();
        }
        self.load(name).unwrap_or_else(|| self.fallback.clone())
    }

    pub fn fallback(&self) -> Icon {
        self.fallback.clone()
    }

    /// Number of successful decodes since creation.
    pub fn decode_count(&self) -> usize {
        self.decodes.load(Ordering::Relaxed)
    }

    /// Number of cached icons.
    pub fn len(&self) -> usize {
        self.loaded.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load(&self, name: &str) -> Option<Icon> {
        if let Some(icon) = self.loaded.read().get(name) {
            return Some(icon.clone());
        }

        let mut loaded = self.loaded.write();
        // Another caller may have decoded it while we waited for the lock
        if let Some(icon) = loaded.get(name) {
            return Some(icon.clone());
        }

        let path = self.dir.join(name);
        if !path.is_file() {
            if self.missing.lock().insert(name.to_string()) {
                warn!("{} not found", path.display());
            } else {
                debug!("{} still missing", path.display());
            }
            return None;
        }

        match decode_file(&path, self.scale) {
            Ok(image) => {
                self.decodes.fetch_add(1, Ordering::Relaxed);
                self.missing.lock().remove(name);
                let icon = Icon::new(name, image);
                loaded.insert(name.to_string(), icon.clone());
                Some(icon)
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }
}

fn decode_file(path: &Path, width: u32) -> Result<RgbaImage> {
    let name = path.display().to_string();
    let data = std::fs::read(path)?;
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        return rasterize_svg(&data, width).map_err(|reason| Error::decode(name, reason));
    }

    let img = image::load_from_memory(&data).map_err(|e| Error::decode(&name, e))?;
    let height = scaled_height(img.width() as f32, img.height() as f32, width);
    Ok(img.resize_exact(width, height, FilterType::Lanczos3).to_rgba8())
}

/// Height keeping the aspect ratio when scaled to `width`.
fn scaled_height(src_width: f32, src_height: f32, width: u32) -> u32 {
    if src_width <= 0.0 {
        return width;
    }
    ((src_height / src_width) * width as f32).round().max(1.0) as u32
}

fn rasterize_svg(data: &[u8], width: u32) -> std::result::Result<RgbaImage, String> {
    let tree = usvg::Tree::from_data(data, &usvg::Options::default()).map_err(|e| e.to_string())?;
    let size = tree.size();
    let height = scaled_height(size.width(), size.height(), width);

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| format!("invalid icon size {}x{}", width, height))?;
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(width, height, rgba).ok_or_else(|| "pixel buffer size mismatch".to_string())
}
