//! Multi-token substring filter.
//!
//! The query is split on whitespace. A row stays visible if at least one of
//! its cells contains every token, case-insensitively.

use std::collections::HashSet;

use super::CellContent;

/// Lowercase, non-empty query tokens.
pub fn query_tokens(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// True if some cell contains all `tokens`.
pub fn row_matches(cells: &[CellContent], tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    cells.iter().any(|cell| {
        let text = cell.filter_text();
        tokens.iter().all(|token| text.contains(token.as_str()))
    })
}

/// Indexes of rows hidden by `query`.
pub fn apply_filter<R: AsRef<[CellContent]>>(rows: &[R], query: &str) -> HashSet<usize> {
    let tokens = query_tokens(query);
    if tokens.is_empty() {
        return HashSet::new();
    }
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            let cells: &[CellContent] = (*row).as_ref();
            !row_matches(cells, &tokens)
        })
        .map(|(i, _)| i)
        .collect()
}
