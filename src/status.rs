//! Light status relative to the loaded preset.

use std::fmt;

use crate::icons::IconKind;

/// Classification of a light row against the loaded preset.
///
/// Variants are declared in severity order, so the derived `Ord` matches
/// [`Status::severity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Status {
    /// Light exists in the scene and matches the preset.
    Found,
    /// Light exists but its type differs from the preset.
    Outdated,
    /// Preset entry not yet present in the scene.
    Add,
    /// Light expected but missing.
    Missing,
    /// No classification available.
    #[default]
    Undefined,
}

impl Status {
    /// All statuses in severity order.
    pub const ALL: [Status; 5] = [
        Status::Found,
        Status::Outdated,
        Status::Add,
        Status::Missing,
        Status::Undefined,
    ];

    /// Fixed severity ordinal (Found = 0 ... Undefined = 4).
    pub fn severity(self) -> u8 {
        match self {
            Status::Found => 0,
            Status::Outdated => 1,
            Status::Add => 2,
            Status::Missing => 3,
            Status::Undefined => 4,
        }
    }

    /// Icon drawn for this status. `Undefined` uses the fallback icon.
    pub fn icon(self) -> Option<IconKind> {
        match self {
            Status::Found => Some(IconKind::Checkmark),
            Status::Outdated => Some(IconKind::Exclamation),
            Status::Add => Some(IconKind::Plus),
            Status::Missing => Some(IconKind::Cross),
            Status::Undefined => None,
        }
    }

    /// Lowercase logical name, used for filtering.
    pub fn name(self) -> &'static str {
        match self {
            Status::Found => "found",
            Status::Outdated => "outdated",
            Status::Add => "add",
            Status::Missing => "missing",
            Status::Undefined => "undefined",
        }
    }

    /// Single-character marker for text output.
    pub fn symbol(self) -> char {
        match self {
            Status::Found => '✓',
            Status::Outdated => '!',
            Status::Add => '+',
            Status::Missing => '✗',
            Status::Undefined => '?',
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_matches_order() {
        for pair in Status::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].severity() < pair[1].severity());
        }
        assert_eq!(Status::Found.severity(), 0);
        assert_eq!(Status::Undefined.severity(), 4);
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(Status::Found.icon(), Some(IconKind::Checkmark));
        assert_eq!(Status::Outdated.icon(), Some(IconKind::Exclamation));
        assert_eq!(Status::Add.icon(), Some(IconKind::Plus));
        assert_eq!(Status::Missing.icon(), Some(IconKind::Cross));
        assert_eq!(Status::Undefined.icon(), None);
    }

    #[test]
    fn test_default_is_undefined() {
        assert_eq!(Status::default(), Status::Undefined);
    }
}
