//! Result table view state.
//!
//! Everything here runs after screening: ticker search, column sort and
//! pagination over the matched rows, plus the state transitions the table
//! controls trigger (header clicks, search submit, page navigation).

use crate::domain::stock::{Column, Stock};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Above this many pages the page list collapses into an ellipsis window.
const MAX_FULL_PAGE_LIST: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn identifier(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" => Ok(SortDirection::Ascending),
            "descending" => Ok(SortDirection::Descending),
            _ => Err(format!(
                "invalid sort direction '{}' (expected ascending or descending)",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub column: Column,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub sort: Option<SortConfig>,
    /// 1-based.
    pub page: usize,
    pub search: String,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            sort: None,
            page: 1,
            search: String::new(),
        }
    }
}

impl TableState {
    /// Header click: ascending, then descending, then unsorted.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = match self.sort {
            Some(SortConfig {
                column: current,
                direction: SortDirection::Ascending,
            }) if current == column => Some(SortConfig {
                column,
                direction: SortDirection::Descending,
            }),
            Some(SortConfig {
                column: current,
                direction: SortDirection::Descending,
            }) if current == column => None,
            _ => Some(SortConfig {
                column,
                direction: SortDirection::Ascending,
            }),
        };
        self.page = 1;
    }

    pub fn with_sort_toggled(&self, column: Column) -> Self {
        let mut next = self.clone();
        next.toggle_sort(column);
        next
    }

    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn apply_search(&mut self, term: &str) {
        self.search = term.trim().to_string();
        self.page = 1;
    }

    /// State after a new query is submitted: first page, no search, sort kept.
    pub fn reset(&mut self) {
        self.page = 1;
        self.search.clear();
    }

    pub fn sort_direction_for(&self, column: Column) -> Option<SortDirection> {
        self.sort
            .filter(|s| s.column == column)
            .map(|s| s.direction)
    }
}

pub fn search_by_ticker<'a>(rows: &[&'a Stock], term: &str) -> Vec<&'a Stock> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .copied()
        .filter(|stock| stock.ticker.to_lowercase().contains(&needle))
        .collect()
}

fn compare(a: &Stock, b: &Stock, sort: SortConfig) -> Ordering {
    let directed = |ord: Ordering| match sort.direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    };

    match sort.column {
        Column::Ticker => directed(a.ticker.to_lowercase().cmp(&b.ticker.to_lowercase())),
        Column::Metric(metric) => {
            let a = a.metric(metric).filter(|v| !v.is_nan());
            let b = b.metric(metric).filter(|v| !v.is_nan());
            // Missing values trail in both directions.
            match (a, b) {
                (Some(x), Some(y)) => directed(x.total_cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
    }
}

/// Stable sort; `None` leaves the order untouched.
pub fn sort_rows(rows: &mut [&Stock], sort: Option<SortConfig>) {
    if let Some(sort) = sort {
        rows.sort_by(|a, b| compare(a, b, sort));
    }
}

pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    row_count.div_ceil(page_size)
}

/// Rows on a 1-based page; empty when the page is out of range.
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Page links: every page for short tables, otherwise the first two, a
/// window around `current`, and the last two, with ellipses for the gaps.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageItem> {
    if total <= MAX_FULL_PAGE_LIST {
        return (1..=total).map(PageItem::Page).collect();
    }

    let mut items = vec![PageItem::Page(1), PageItem::Page(2)];
    let start = current.saturating_sub(1).max(3);
    let end = current.saturating_add(1).min(total - 2);

    if start > 3 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total - 2 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Page(total - 1));
    items.push(PageItem::Page(total));
    items
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub rows: Vec<&'a Stock>,
    pub page: usize,
    pub page_size: usize,
    /// Rows left after the ticker search, across all pages.
    pub total_rows: usize,
    pub total_pages: usize,
}

pub fn build_view<'a>(rows: &[&'a Stock], state: &TableState, page_size: usize) -> TableView<'a> {
    let mut visible = search_by_ticker(rows, &state.search);
    sort_rows(&mut visible, state.sort);

    let total_rows = visible.len();
    TableView {
        rows: paginate(&visible, state.page, page_size).to_vec(),
        page: state.page,
        page_size,
        total_rows,
        total_pages: total_pages(total_rows, page_size),
    }
}
