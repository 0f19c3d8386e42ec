//! Integration tests for icon rendering and the decoded-icon cache.

use std::sync::Arc;
use std::thread;

use light_lister::icons::{IconCache, IconKind};
use light_lister::Status;

#[test]
fn test_missing_dir_renders_everything() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("LightLister").join("Icons");
    let icons = IconCache::new(&dir);
    assert!(!icons.required_checked());

    let rendered = icons.ensure_required().unwrap();
    assert_eq!(rendered, IconKind::REQUIRED.to_vec());
    assert!(icons.required_checked());
    for kind in IconKind::REQUIRED {
        assert!(dir.join(kind.file_name()).is_file(), "{} not written", kind.file_name());
    }

    // Second run has nothing to do
    assert!(icons.ensure_required().unwrap().is_empty());
}

#[test]
fn test_only_missing_files_rendered() {
    let tmp = tempfile::tempdir().unwrap();
    let icons = IconCache::new(tmp.path());
    icons.ensure_required().unwrap();

    let cross = tmp.path().join(IconKind::Cross.file_name());
    std::fs::remove_file(&cross).unwrap();
    let before = std::fs::read(tmp.path().join(IconKind::Plus.file_name())).unwrap();

    let rendered = IconCache::new(tmp.path()).ensure_required().unwrap();
    assert_eq!(rendered, vec![IconKind::Cross]);
    assert!(cross.is_file());
    let after = std::fs::read(tmp.path().join(IconKind::Plus.file_name())).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_icon_decoded_once() {
    let tmp = tempfile::tempdir().unwrap();
    let icons = IconCache::new(tmp.path());
    icons.ensure_required().unwrap();
    assert_eq!(icons.decode_count(), 0);

    let first = icons.icon(IconKind::Checkmark);
    let second = icons.icon(IconKind::Checkmark);
    assert_eq!(icons.decode_count(), 1);
    assert!(first.same_image(&second));
    assert!(!first.is_fallback());
    assert_eq!(first.name(), "checkmark.svg");
    assert_eq!(first.width(), 20);
    assert_eq!(first.height(), 20);

    // Status lookup goes through the same entry
    let found = icons.status_icon(Status::Found);
    assert!(found.same_image(&first));
    assert_eq!(icons.decode_count(), 1);
    assert_eq!(icons.len(), 1);
}

#[test]
fn test_custom_scale() {
    let tmp = tempfile::tempdir().unwrap();
    let icons = IconCache::with_scale(tmp.path(), 48);
    icons.ensure_required().unwrap();

    let icon = icons.icon(IconKind::Exclamation);
    assert_eq!(icon.width(), 48);
    assert_eq!(icon.height(), 48);
    assert_eq!(icon.rgba().len(), 48 * 48 * 4);
}

#[test]
fn test_missing_file_falls_back() {
    let tmp = tempfile::tempdir().unwrap();
    let icons = IconCache::new(tmp.path());

    let icon = icons.icon_by_name("volumeLight.png");
    assert!(icon.is_fallback());
    assert_eq!(icons.decode_count(), 0);

    // Repeated misses stay misses
    assert!(icons.icon_by_name("volumeLight.png").is_fallback());
    assert!(icons.is_empty());
}

#[test]
fn test_undefined_status_uses_fallback() {
    let tmp = tempfile::tempdir().unwrap();
    let icons = IconCache::new(tmp.path());
    icons.ensure_required().unwrap();

    assert!(icons.status_icon(Status::Undefined).is_fallback());
    assert!(!icons.status_icon(Status::Missing).is_fallback());
}

#[test]
fn test_concurrent_lookups_decode_once() {
    let tmp = tempfile::tempdir().unwrap();
    let icons = Arc::new(IconCache::new(tmp.path()));
    icons.ensure_required().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let icons = Arc::clone(&icons);
            thread::spawn(move || icons.icon(IconKind::Plus))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(icons.decode_count(), 1);
    assert!(results.windows(2).all(|w| w[0].same_image(&w[1])));
}

#[test]
fn test_raster_type_icon() {
    let tmp = tempfile::tempdir().unwrap();
    let png = tmp.path().join("spotLight.png");
    image::RgbaImage::from_pixel(64, 32, image::Rgba([255, 200, 0, 255]))
        .save(&png)
        .unwrap();

    let icons = IconCache::new(tmp.path());
    let icon = icons.icon_by_name("spotLight.png");
    assert!(!icon.is_fallback());
    assert_eq!(icon.width(), 20);
    assert_eq!(icon.height(), 10);
}
