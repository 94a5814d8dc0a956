//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::domain::error::ScreenerError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<ScreenerError> for WebError {
    fn from(err: ScreenerError) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let template = super::templates::ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        };
        let content = match template.render() {
            Ok(html) => html,
            Err(_) => return (self.status, self.message).into_response(),
        };
        let page = super::templates::BasePage {
            title: "Error",
            content: &content,
        };
        match page.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, Html(content)).into_response(),
        }
    }
}

pub fn status_from_error(err: &ScreenerError) -> StatusCode {
    match err {
        ScreenerError::NoValidConditions => StatusCode::UNPROCESSABLE_ENTITY,
        ScreenerError::ConfigParse { .. }
        | ScreenerError::ConfigMissing { .. }
        | ScreenerError::ConfigInvalid { .. }
        | ScreenerError::DataSource { .. }
        | ScreenerError::DataFormat { .. }
        | ScreenerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
