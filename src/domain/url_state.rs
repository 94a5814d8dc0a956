//! Screen state persisted in URL query parameters.
//!
//! Recognised parameters: `query` (raw query text), `sortKey`, `sortDirection`
//! (`ascending` / `descending`), `page` (1-based) and `search` (ticker
//! substring). Parsing is lenient: bad values fall back to defaults instead
//! of failing, so any URL restores some valid view.

use url::form_urlencoded;

use crate::domain::stock::Column;
use crate::domain::table::{SortConfig, SortDirection, TableState};

pub const PARAM_QUERY: &str = "query";
pub const PARAM_SORT_KEY: &str = "sortKey";
pub const PARAM_SORT_DIRECTION: &str = "sortDirection";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_SEARCH: &str = "search";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    pub query: String,
    pub table: TableState,
}

impl ScreenState {
    pub fn from_query_string(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);

        let mut query = None;
        let mut sort_key = None;
        let mut sort_direction = None;
        let mut page = None;
        let mut search = None;

        // First occurrence wins.
        for (key, value) in form_urlencoded::parse(input.as_bytes()) {
            let slot = match key.as_ref() {
                PARAM_QUERY => &mut query,
                PARAM_SORT_KEY => &mut sort_key,
                PARAM_SORT_DIRECTION => &mut sort_direction,
                PARAM_PAGE => &mut page,
                PARAM_SEARCH => &mut search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        let column = sort_key.and_then(|k| k.parse::<Column>().ok());
        let direction = sort_direction.and_then(|d| d.parse::<SortDirection>().ok());
        let sort = match (column, direction) {
            (Some(column), Some(direction)) => Some(SortConfig { column, direction }),
            _ => None,
        };

        let page = page
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        Self {
            query: query.unwrap_or_default(),
            table: TableState {
                sort,
                page,
                search: search.map(|s| s.trim().to_string()).unwrap_or_default(),
            },
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.query.is_empty() {
            serializer.append_pair(PARAM_QUERY, &self.query);
        }
        serializer.append_pair(PARAM_PAGE, &self.table.page.to_string());
        if !self.table.search.is_empty() {
            serializer.append_pair(PARAM_SEARCH, &self.table.search);
        }
        if let Some(sort) = self.table.sort {
            serializer.append_pair(PARAM_SORT_KEY, sort.column.identifier());
            serializer.append_pair(PARAM_SORT_DIRECTION, sort.direction.identifier());
        }
        serializer.finish()
    }

    /// Relative link (`?…`) that restores this state.
    pub fn href(&self) -> String {
        format!("?{}", self.to_query_string())
    }

    /// A newly submitted query starts from the first page with no ticker search.
    pub fn submit_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.table.reset();
    }

    pub fn with_table(&self, table: TableState) -> Self {
        Self {
            query: self.query.clone(),
            table,
        }
    }
}
