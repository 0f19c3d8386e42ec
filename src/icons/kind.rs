//! Status glyph identifiers.

use std::fmt;

/// One of the status glyphs rendered to the icon directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IconKind {
    Checkmark,
    Cross,
    Exclamation,
    Plus,
}

impl IconKind {
    /// Glyphs that must exist on disk before any icon is shown.
    pub const REQUIRED: [IconKind; 4] = [
        IconKind::Checkmark,
        IconKind::Cross,
        IconKind::Exclamation,
        IconKind::Plus,
    ];

    /// Logical name of the glyph.
    pub fn name(self) -> &'static str {
        match self {
            IconKind::Checkmark => "checkmark",
            IconKind::Cross => "cross",
            IconKind::Exclamation => "exclamation",
            IconKind::Plus => "plus",
        }
    }

    /// File name inside the icon directory.
    pub fn file_name(self) -> &'static str {
        match self {
            IconKind::Checkmark => "checkmark.svg",
            IconKind::Cross => "cross.svg",
            IconKind::Exclamation => "exclamation.svg",
            IconKind::Plus => "plus.svg",
        }
    }

    /// Stroke color as RGB.
    pub fn color(self) -> [u8; 3] {
        match self {
            IconKind::Checkmark => [0, 255, 0],
            IconKind::Cross => [255, 0, 0],
            IconKind::Exclamation => [255, 255, 0],
            IconKind::Plus => [255, 255, 255],
        }
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_file_names_unique() {
        let names: HashSet<_> = IconKind::REQUIRED.iter().map(|k| k.file_name()).collect();
        assert_eq!(names.len(), IconKind::REQUIRED.len());
        for kind in IconKind::REQUIRED {
            assert!(kind.file_name().starts_with(kind.name()));
            assert!(kind.file_name().ends_with(".svg"));
        }
    }

    #[test]
    fn test_colors_distinct() {
        let colors: HashSet<_> = IconKind::REQUIRED.iter().map(|k| k.color()).collect();
        assert_eq!(colors.len(), IconKind::REQUIRED.len());
    }
}
