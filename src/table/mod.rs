//! Light table: cell contents, sorting, filtering and the row model.
//!
//! - [`CellContent`] / [`compare_cells`] - Tagged cell content and comparator
//! - [`apply_filter`] - Multi-token substring filter
//! - [`LightTable`] - Rows with icons, sort state, hidden set, column layout

mod cell;
mod filter;
mod model;

pub use cell::{compare_cells, CellContent, IconCell, SortOrder};
pub use filter::{apply_filter, query_tokens, row_matches};
pub use model::{
    type_icon_name, Column, ColumnLayout, LightTable, TableRow, DEFAULT_ROW_CAPACITY,
    STATUS_COLUMN_WIDTH, TYPE_COLUMN_WIDTH,
};
