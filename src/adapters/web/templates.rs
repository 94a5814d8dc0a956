//! HTML templates using Askama.
//!
//! Each page is a fragment template; full page loads wrap the fragment in
//! [`BasePage`], HTMX requests receive the fragment alone.

use askama::Template;

use crate::domain::screener::ScreenOutcome;
use crate::domain::stock::Column;
use crate::domain::table::{PageItem, SortDirection, TableView, page_numbers};
use crate::domain::url_state::ScreenState;

#[derive(Template)]
#[template(path = "base.html")]
pub struct BasePage<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

pub struct Alert {
    pub title: &'static str,
    pub message: &'static str,
    /// CSS modifier: `info` or `error`.
    pub kind: &'static str,
}

impl Alert {
    pub fn for_outcome(outcome: &ScreenOutcome<'_>) -> Option<Self> {
        match outcome {
            ScreenOutcome::NoValidConditions => Some(Alert {
                title: "Error",
                message: crate::domain::screener::NO_VALID_CONDITIONS,
                kind: "error",
            }),
            ScreenOutcome::NoMatches { .. } => Some(Alert {
                title: "Sorry!",
                message: crate::domain::screener::NO_MATCHING_RESULTS,
                kind: "info",
            }),
            ScreenOutcome::Matches { .. } => None,
        }
    }
}

pub struct HeaderCell {
    pub label: &'static str,
    pub href: String,
    pub indicator: &'static str,
    pub aria_sort: &'static str,
}

pub struct PageLink {
    pub label: String,
    /// `None` for the current page and for ellipses.
    pub href: Option<String>,
    pub current: bool,
}

pub struct HiddenField {
    pub name: &'static str,
    pub value: String,
}

pub struct ResultsTable {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<Vec<String>>,
    pub pages: Vec<PageLink>,
    pub first_href: Option<String>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub last_href: Option<String>,
    pub summary: String,
}

impl ResultsTable {
    pub fn build(state: &ScreenState, view: &TableView<'_>) -> Self {
        let table = &state.table;

        let headers = Column::ALL
            .into_iter()
            .map(|column| {
                let direction = table.sort_direction_for(column);
                HeaderCell {
                    label: column.header(),
                    href: state.with_table(table.with_sort_toggled(column)).href(),
                    indicator: match direction {
                        Some(SortDirection::Ascending) => "\u{25b2}",
                        Some(SortDirection::Descending) => "\u{25bc}",
                        None => "",
                    },
                    aria_sort: match direction {
                        Some(SortDirection::Ascending) => "ascending",
                        Some(SortDirection::Descending) => "descending",
                        None => "none",
                    },
                }
            })
            .collect();

        let rows = view
            .rows
            .iter()
            .map(|stock| Column::ALL.into_iter().map(|c| stock.cell(c)).collect())
            .collect();

        let page_href = |page: usize| state.with_table(table.with_page(page)).href();
        let pages = page_numbers(view.page, view.total_pages)
            .into_iter()
            .map(|item| match item {
                PageItem::Page(n) => PageLink {
                    label: n.to_string(),
                    href: (n != view.page).then(|| page_href(n)),
                    current: n == view.page,
                },
                PageItem::Ellipsis => PageLink {
                    label: "\u{2026}".to_string(),
                    href: None,
                    current: false,
                },
            })
            .collect();

        let has_prev = view.page > 1 && view.total_pages > 0;
        let has_next = view.page < view.total_pages;

        Self {
            headers,
            rows,
            pages,
            first_href: has_prev.then(|| page_href(1)),
            prev_href: has_prev.then(|| page_href((view.page - 1).min(view.total_pages))),
            next_href: has_next.then(|| page_href(view.page + 1)),
            last_href: has_next.then(|| page_href(view.total_pages)),
            summary: format!(
                "Page {} of {} ({} rows)",
                view.page, view.total_pages, view.total_rows
            ),
        }
    }
}

#[derive(Template)]
#[template(path = "screener.html")]
pub struct ScreenerTemplate<'a> {
    pub query: &'a str,
    pub search: &'a str,
    /// Sort state carried through the query and search forms.
    pub sort_fields: Vec<HiddenField>,
    pub alert: Option<Alert>,
    pub results: Option<ResultsTable>,
}

impl<'a> ScreenerTemplate<'a> {
    pub fn new(state: &'a ScreenState) -> Self {
        let sort_fields = state
            .table
            .sort
            .map(|sort| {
                vec![
                    HiddenField {
                        name: crate::domain::url_state::PARAM_SORT_KEY,
                        value: sort.column.identifier().to_string(),
                    },
                    HiddenField {
                        name: crate::domain::url_state::PARAM_SORT_DIRECTION,
                        value: sort.direction.identifier().to_string(),
                    },
                ]
            })
            .unwrap_or_default();

        Self {
            query: &state.query,
            search: &state.table.search,
            sort_fields,
            alert: None,
            results: None,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
