//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    Json,
    extract::{Query, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::domain::filter::filter_stocks;
use crate::domain::query_parser::explain_query;
use crate::domain::screener::{NO_VALID_CONDITIONS, screen};
use crate::domain::table::build_view;
use crate::domain::url_state::ScreenState;

use super::templates::{Alert, BasePage, ResultsTable, ScreenerTemplate};
use super::{AppState, WebError, is_htmx_request};

const STOCK_LOAD_FAILED: &str = "Failed to fetch stock data";

fn render_page(title: &str, fragment: String, headers: &HeaderMap) -> Result<Response, WebError> {
    if is_htmx_request(headers) {
        return Ok(Html(fragment).into_response());
    }
    let page = BasePage {
        title,
        content: &fragment,
    };
    let html = page
        .render()
        .map_err(|e| WebError::internal(format!("template error: {}", e)))?;
    Ok(Html(html).into_response())
}

pub async fn screener_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Result<Response, WebError> {
    let screen_state = ScreenState::from_query_string(raw.as_deref().unwrap_or_default());
    let mut template = ScreenerTemplate::new(&screen_state);

    // Nothing is screened until a query has been submitted.
    if !screen_state.query.trim().is_empty() {
        let stocks = state.stock_port.load_stocks()?;
        let outcome = screen(&stocks, &screen_state.query);
        template.alert = Alert::for_outcome(&outcome);
        if !outcome.stocks().is_empty() {
            let view = build_view(outcome.stocks(), &screen_state.table, state.page_size);
            template.results = Some(ResultsTable::build(&screen_state, &view));
        }
    }

    let fragment = template
        .render()
        .map_err(|e| WebError::internal(format!("template error: {}", e)))?;
    render_page("Stock Screening Tool", fragment, &headers)
}

pub async fn api_stocks(State(state): State<Arc<AppState>>) -> Response {
    match state.stock_port.load_stocks() {
        Ok(stocks) => Json(stocks).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to load stocks");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": STOCK_LOAD_FAILED })),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScreenParams {
    #[serde(default)]
    pub query: String,
}

pub async fn api_screen(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScreenParams>,
) -> Response {
    let report = explain_query(&params.query);
    if report.conditions.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": NO_VALID_CONDITIONS })),
        )
            .into_response();
    }

    let stocks = match state.stock_port.load_stocks() {
        Ok(stocks) => stocks,
        Err(e) => {
            tracing::error!(error = %e, "failed to load stocks");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": STOCK_LOAD_FAILED })),
            )
                .into_response();
        }
    };

    let results = filter_stocks(&stocks, &report.conditions);
    let rejected: Vec<_> = report
        .rejected
        .iter()
        .map(|r| {
            json!({
                "clause": r.clause,
                "message": r.error.message,
                "position": r.error.position,
            })
        })
        .collect();

    Json(json!({
        "conditions": report.conditions,
        "rejected": rejected,
        "results": results,
    }))
    .into_response()
}

pub async fn not_found() -> WebError {
    WebError::not_found("Page not found")
}
