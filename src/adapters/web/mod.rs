//! Web server adapter.
//!
//! Axum server with an HTMX-enhanced screener page and two JSON endpoints.
//! Screen state lives entirely in the URL query string, so every view is a
//! plain GET and can be bookmarked.

mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::error::ScreenerError;
use crate::ports::stock_port::StockPort;

pub struct AppState {
    pub stock_port: Arc<dyn StockPort + Send + Sync>,
    pub page_size: usize,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::screener_page))
        .route("/api/stocks", get(handlers::api_stocks))
        .route("/api/screen", get(handlers::api_screen))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<(), ScreenerError> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "web server listening");
    axum::serve(listener, router).await?;
    Ok(())
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
