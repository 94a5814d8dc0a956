//! Query submission: parse, then filter, keeping the two empty outcomes apart.

use crate::domain::condition::{Condition, Query};
use crate::domain::filter::filter_stocks;
use crate::domain::query_parser::parse_query;
use crate::domain::stock::Stock;

pub const NO_VALID_CONDITIONS: &str = "No valid conditions found. Please check your query.";
pub const NO_MATCHING_RESULTS: &str = "No matching results found.";

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenOutcome<'a> {
    /// Nothing in the query parsed into a condition.
    NoValidConditions,
    /// Conditions parsed, but no record satisfied all of them.
    NoMatches { conditions: Query },
    Matches {
        conditions: Query,
        stocks: Vec<&'a Stock>,
    },
}

impl<'a> ScreenOutcome<'a> {
    pub fn conditions(&self) -> &[Condition] {
        match self {
            ScreenOutcome::NoValidConditions => &[],
            ScreenOutcome::NoMatches { conditions } | ScreenOutcome::Matches { conditions, .. } => {
                conditions
            }
        }
    }

    pub fn stocks(&self) -> &[&'a Stock] {
        match self {
            ScreenOutcome::Matches { stocks, .. } => stocks,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            ScreenOutcome::NoValidConditions => Some(NO_VALID_CONDITIONS),
            ScreenOutcome::NoMatches { .. } => Some(NO_MATCHING_RESULTS),
            ScreenOutcome::Matches { .. } => None,
        }
    }
}

pub fn screen<'a>(stocks: &'a [Stock], query: &str) -> ScreenOutcome<'a> {
    let conditions = parse_query(query);
    if conditions.is_empty() {
        return ScreenOutcome::NoValidConditions;
    }

    let matched = filter_stocks(stocks, &conditions);
    tracing::debug!(
        conditions = conditions.len(),
        matched = matched.len(),
        total = stocks.len(),
        "screened stocks"
    );

    if matched.is_empty() {
        ScreenOutcome::NoMatches { conditions }
    } else {
        ScreenOutcome::Matches {
            conditions,
            stocks: matched,
        }
    }
}
