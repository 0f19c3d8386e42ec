//! Table cell contents and the sort comparator.

use std::cmp::Ordering;

use crate::status::Status;

/// Icon cell: a status severity and an optional logical name.
///
/// Type icons carry the light type as name; status icons leave it empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconCell {
    pub status: Status,
    pub name: String,
}

impl IconCell {
    /// Unnamed status icon.
    pub fn status(status: Status) -> Self {
        Self { status, name: String::new() }
    }

    /// Icon identified by name.
    pub fn named(name: impl Into<String>, status: Status) -> Self {
        Self { status, name: name.into() }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    /// Logical name used for filtering.
    pub fn logical_name(&self) -> &str {
        if self.name.is_empty() {
            self.status.name()
        } else {
            &self.name
        }
    }
}

/// Content of one table cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellContent {
    Number(f64),
    Icon(IconCell),
    Text(String),
}

impl CellContent {
    /// Underlying text, used for mixed comparisons and display.
    pub fn text(&self) -> String {
        match self {
            CellContent::Number(n) => n.to_string(),
            CellContent::Icon(icon) => icon.logical_name().to_string(),
            CellContent::Text(text) => text.clone(),
        }
    }

    /// Lowercase text matched by the filter.
    pub fn filter_text(&self) -> String {
        self.text().to_lowercase()
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Apply the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Ascending comparison of two cells.
///
/// Numbers compare numerically. Two icons compare by name when both carry
/// one, otherwise by severity. Anything else compares by text.
pub fn compare_cells(a: &CellContent, b: &CellContent) -> Ordering {
    match (a, b) {
        (CellContent::Number(x), CellContent::Number(y)) => x.total_cmp(y),
        (CellContent::Icon(x), CellContent::Icon(y)) => {
            if x.has_name() && y.has_name() {
                x.name.cmp(&y.name)
            } else {
                x.status.severity().cmp(&y.status.severity())
            }
        }
        _ => a.text().cmp(&b.text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_numeric() {
        let a = CellContent::Number(9.0);
        let b = CellContent::Number(10.0);
        assert_eq!(compare_cells(&a, &b), Ordering::Less);
        // As text "10" < "9"; numeric comparison must win.
        assert_eq!(a.text().cmp(&b.text()), Ordering::Greater);
    }

    #[test]
    fn test_severity_order() {
        let found = CellContent::Icon(IconCell::status(Status::Found));
        let missing = CellContent::Icon(IconCell::status(Status::Missing));
        assert_eq!(compare_cells(&found, &missing), Ordering::Less);
        assert_eq!(compare_cells(&missing, &found), Ordering::Greater);
    }

    #[test]
    fn test_name_overrides_severity() {
        let a = CellContent::Icon(IconCell::named("Aa", Status::Undefined));
        let b = CellContent::Icon(IconCell::named("Bb", Status::Found));
        assert_eq!(compare_cells(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_single_char_names() {
        let a = CellContent::Icon(IconCell::named("A", Status::Undefined));
        let b = CellContent::Icon(IconCell::named("B", Status::Found));
        assert_eq!(compare_cells(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_one_unnamed_uses_severity() {
        let a = CellContent::Icon(IconCell::named("Aa", Status::Undefined));
        let b = CellContent::Icon(IconCell::status(Status::Found));
        assert_eq!(compare_cells(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_mixed_falls_back_to_text() {
        let text = CellContent::Text("abc".into());
        let num = CellContent::Number(5.0);
        assert_eq!(compare_cells(&num, &text), Ordering::Less);
    }

    #[test]
    fn test_logical_name() {
        assert_eq!(IconCell::status(Status::Add).logical_name(), "add");
        assert_eq!(IconCell::named("spotLight", Status::Found).logical_name(), "spotLight");
        assert_eq!(CellContent::Icon(IconCell::named("spotLight", Status::Found)).filter_text(), "spotlight");
    }

    #[test]
    fn test_sort_order_apply() {
        assert_eq!(SortOrder::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
    }
}
