//! Light table model: rows with icons, sorting, filtering and column widths.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info_span, warn};

use super::filter::{query_tokens, row_matches};
use super::{compare_cells, CellContent, IconCell, SortOrder};
use crate::icons::{Icon, IconCache};
use crate::lister::Row;

/// Rows allocated before any data arrives.
pub const DEFAULT_ROW_CAPACITY: usize = 5;

/// Width of the leading type icon column.
pub const TYPE_COLUMN_WIDTH: f32 = 30.0;

/// Width of the trailing status icon column.
pub const STATUS_COLUMN_WIDTH: f32 = 25.0;

/// Space reserved next to the name column when the splitter moves.
const SPLITTER_MARGIN: f32 = 60.0;

/// Table columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Type,
    Name,
    Status,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Type, Column::Name, Column::Status];

    pub fn index(self) -> usize {
        match self {
            Column::Type => 0,
            Column::Name => 1,
            Column::Status => 2,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "type" => Some(Column::Type),
            "name" => Some(Column::Name),
            "status" => Some(Column::Status),
            _ => None,
        }
    }
}

/// File name looked up for a light type icon (`<type>.png`, else `<type>.svg`).
pub fn type_icon_name(icons: &IconCache, light_type: &str) -> String {
    let png = format!("{}.png", light_type);
    if icons.dir().join(&png).is_file() {
        png
    } else {
        format!("{}.svg", light_type)
    }
}

/// A populated row: data, icons and cell contents.
#[derive(Clone, Debug)]
pub struct TableRow {
    pub row: Row,
    pub type_icon: Icon,
    pub status_icon: Icon,
    cells: [CellContent; 3],
}

impl TableRow {
    pub fn cells(&self) -> &[CellContent; 3] {
        &self.cells
    }

    pub fn cell(&self, column: Column) -> &CellContent {
        &self.cells[column.index()]
    }
}

impl AsRef<[CellContent]> for TableRow {
    fn as_ref(&self) -> &[CellContent] {
        &self.cells
    }
}

/// Column widths following the list/attribute splitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnLayout {
    widths: [f32; 3],
}

impl ColumnLayout {
    /// Initial layout for a window of `window_width`.
    pub fn new(window_width: f32) -> Self {
        Self {
            widths: [TYPE_COLUMN_WIDTH, window_width / 2.0 + 20.0, STATUS_COLUMN_WIDTH],
        }
    }

    /// Splitter handle moved to `pos`; the name column takes the remaining width.
    pub fn splitter_moved(&mut self, pos: f32, handle_width: f32) {
        self.widths = [
            TYPE_COLUMN_WIDTH,
            (pos - SPLITTER_MARGIN - 2.0 * handle_width).max(0.0),
            STATUS_COLUMN_WIDTH,
        ];
    }

    pub fn width(&self, column: Column) -> f32 {
        self.widths[column.index()]
    }

    pub fn widths(&self) -> [f32; 3] {
        self.widths
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(600.0)
    }
}

/// Table of light rows sharing one icon cache.
pub struct LightTable {
    icons: Arc<IconCache>,
    rows: Vec<Option<TableRow>>,
    hidden: HashSet<usize>,
    filter: String,
    sort: Option<(Column, SortOrder)>,
    layout: ColumnLayout,
}

impl LightTable {
    /// Create an empty table. Renders missing status icons on first use of
    /// the cache.
    pub fn new(icons: Arc<IconCache>) -> Self {
        if !icons.required_checked() {
            if let Err(e) = icons.ensure_required() {
                warn!("Cannot render status icons in {}: {}", icons.dir().display(), e);
            }
        }
        Self {
            icons,
            rows: vec![None; DEFAULT_ROW_CAPACITY],
            hidden: HashSet::new(),
            filter: String::new(),
            sort: None,
            layout: ColumnLayout::default(),
        }
    }

    pub fn icons(&self) -> &Arc<IconCache> {
        &self.icons
    }

    /// Build the icons and cells for a row.
    pub fn make_row(&self, row: Row) -> TableRow {
        let type_icon = self.icons.icon_by_name(&type_icon_name(&self.icons, &row.light_type));
        let status_icon = self.icons.status_icon(row.status);
        let cells = [
            CellContent::Icon(IconCell::named(row.light_type.clone(), row.status)),
            CellContent::Text(row.display_name.clone()),
            CellContent::Icon(IconCell::status(row.status)),
        ];
        TableRow { row, type_icon, status_icon, cells }
    }

    /// Replace all rows, then re-apply the current sort and filter.
    pub fn populate(&mut self, rows: Vec<Row>) {
        let _span = info_span!("populate_table", rows = rows.len()).entered();
        self.rows.clear();
        self.rows.resize(rows.len(), None);
        for (index, row) in rows.into_iter().enumerate() {
            self.set_row(index, row);
        }
        if let Some((column, order)) = self.sort {
            self.sort_by(column, order);
        } else {
            self.refilter();
        }
    }

    /// Put `row` at `index`, growing the table if needed.
    pub fn set_row(&mut self, index: usize, row: Row) {
        if index >= self.rows.len() {
            warn!(
                "Row {} is beyond table capacity {}, growing table",
                index,
                self.rows.len()
            );
            self.rows.resize(index + 1, None);
        }
        self.rows[index] = Some(self.make_row(row));
    }

    /// Allocated rows, including empty slots.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Resize the allocation, dropping rows past `count`.
    pub fn set_row_count(&mut self, count: usize) {
        self.rows.resize(count, None);
        self.hidden.retain(|&i| i < count);
    }

    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index).and_then(Option::as_ref)
    }

    /// Filled rows with their indexes.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &TableRow)> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|row| (i, row)))
    }

    /// Filled rows not hidden by the filter.
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, &TableRow)> {
        self.rows().filter(|(i, _)| !self.hidden.contains(i))
    }

    /// Index of the row for a light path.
    pub fn find(&self, path: &str) -> Option<usize> {
        self.rows().find(|(_, r)| r.row.path == path).map(|(i, _)| i)
    }

    /// Stable sort of the filled rows on `column`.
    pub fn sort_by(&mut self, column: Column, order: SortOrder) {
        debug!("Sorting on {:?} ({:?})", column, order);
        let capacity = self.rows.len();
        let mut filled: Vec<TableRow> = self.rows.drain(..).flatten().collect();
        filled.sort_by(|a, b| order.apply(compare_cells(a.cell(column), b.cell(column))));
        self.rows = filled.into_iter().map(Some).collect();
        self.rows.resize(capacity.max(self.rows.len()), None);
        self.sort = Some((column, order));
        self.refilter();
    }

    /// Current sort column and order.
    pub fn sort(&self) -> Option<(Column, SortOrder)> {
        self.sort
    }

    /// Hide rows not matching `query`, returning the hidden indexes.
    pub fn apply_filter(&mut self, query: &str) -> &HashSet<usize> {
        if self.filter != query {
            self.filter = query.to_string();
        }
        self.refilter();
        &self.hidden
    }

    fn refilter(&mut self) {
        let tokens = query_tokens(&self.filter);
        self.hidden = self
            .rows()
            .filter(|(_, row)| !row_matches(row.cells(), &tokens))
            .map(|(i, _)| i)
            .collect();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn hidden(&self) -> &HashSet<usize> {
        &self.hidden
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.contains(&index)
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut ColumnLayout {
        &mut self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;

    fn row(path: &str, light_type: &str, status: Status) -> Row {
        Row {
            path: path.to_string(),
            display_name: crate::scene::display_name(path),
            light_type: light_type.to_string(),
            status,
            shape: None,
        }
    }

    fn table(dir: &std::path::Path) -> LightTable {
        LightTable::new(Arc::new(IconCache::new(dir)))
    }

    #[test]
    fn test_new_renders_required_icons() {
        let dir = tempfile::tempdir().unwrap();
        let icons_dir = dir.path().join("Icons");
        let table = table(&icons_dir);
        assert!(table.icons().required_checked());
        assert!(icons_dir.join("checkmark.svg").exists());
        assert_eq!(table.row_count(), DEFAULT_ROW_CAPACITY);
        assert_eq!(table.rows().count(), 0);
    }

    #[test]
    fn test_set_row_grows() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = table(dir.path());
        table.set_row(7, row("|key", "spotLight", Status::Found));
        assert_eq!(table.row_count(), 8);
        assert_eq!(table.row(7).unwrap().row.path, "|key");
        assert!(table.row(6).is_none());
    }

    #[test]
    fn test_populate_builds_cells() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = table(dir.path());
        table.populate(vec![row("|grp|key", "spotLight", Status::Found)]);

        let r = table.row(0).unwrap();
        assert_eq!(r.cell(Column::Name), &CellContent::Text("grp > key".into()));
        assert_eq!(
            r.cell(Column::Type),
            &CellContent::Icon(IconCell::named("spotLight", Status::Found))
        );
        assert_eq!(r.status_icon.name(), "checkmark.svg");
        // No spotLight icon in the directory.
        assert!(r.type_icon.is_fallback());
    }

    #[test]
    fn test_sort_by_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = table(dir.path());
        table.populate(vec![
            row("|a", "spotLight", Status::Missing),
            row("|b", "spotLight", Status::Found),
            row("|c", "spotLight", Status::Add),
        ]);

        table.sort_by(Column::Status, SortOrder::Ascending);
        let paths: Vec<_> = table.rows().map(|(_, r)| r.row.path.clone()).collect();
        assert_eq!(paths, vec!["|b", "|c", "|a"]);

        table.sort_by(Column::Status, SortOrder::Descending);
        let paths: Vec<_> = table.rows().map(|(_, r)| r.row.path.clone()).collect();
        assert_eq!(paths, vec!["|a", "|c", "|b"]);
    }

    #[test]
    fn test_sort_by_type_uses_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = table(dir.path());
        table.populate(vec![
            row("|a", "spotLight", Status::Found),
            row("|b", "areaLight", Status::Missing),
        ]);
        table.sort_by(Column::Type, SortOrder::Ascending);
        assert_eq!(table.row(0).unwrap().row.path, "|b");
    }

    #[test]
    fn test_filter_survives_populate_and_sort() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = table(dir.path());
        table.populate(vec![
            row("|grp|key", "spotLight", Status::Found),
            row("|grp|fill", "areaLight", Status::Add),
        ]);

        let hidden = table.apply_filter("FILL").clone();
        assert_eq!(hidden, HashSet::from([0]));
        let visible: Vec<_> = table.visible_rows().map(|(_, r)| r.row.path.clone()).collect();
        assert_eq!(visible, vec!["|grp|fill"]);

        table.sort_by(Column::Name, SortOrder::Ascending);
        // "grp > fill" now sorts first; the filter follows the row.
        assert_eq!(table.hidden(), &HashSet::from([1]));

        table.populate(vec![row("|grp|key", "spotLight", Status::Found)]);
        assert!(table.is_hidden(0));
        assert_eq!(table.filter(), "FILL");
    }

    #[test]
    fn test_find() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = table(dir.path());
        table.populate(vec![row("|a", "spotLight", Status::Found), row("|b", "spotLight", Status::Found)]);
        assert_eq!(table.find("|b"), Some(1));
        assert_eq!(table.find("|z"), None);
    }

    #[test]
    fn test_column_layout() {
        let mut layout = ColumnLayout::new(600.0);
        assert_eq!(layout.widths(), [30.0, 320.0, 25.0]);

        layout.splitter_moved(400.0, 5.0);
        assert_eq!(layout.width(Column::Name), 330.0);
        assert_eq!(layout.width(Column::Type), TYPE_COLUMN_WIDTH);

        layout.splitter_moved(10.0, 5.0);
        assert_eq!(layout.width(Column::Name), 0.0);
    }

    #[test]
    fn test_column_from_name() {
        assert_eq!(Column::from_name("Type"), Some(Column::Type));
        assert_eq!(Column::from_name("status"), Some(Column::Status));
        assert_eq!(Column::from_name("size"), None);
    }
}
