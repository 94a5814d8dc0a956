//! Core domain types and logic.

pub mod stock;
pub mod condition;
pub mod query_parser;
pub mod filter;
pub mod screener;
pub mod table;
pub mod url_state;
pub mod config_validation;
pub mod error;
