//! Configuration validation.
//!
//! Every key is optional; a key that is present must hold a usable value.

use crate::domain::error::ScreenerError;
use crate::ports::config_port::ConfigPort;
use std::net::SocketAddr;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    validate_data_path(config)?;
    validate_page_size(config)?;
    validate_listen(config)?;
    Ok(())
}

fn validate_data_path(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    match config.get_string("data", "path") {
        Some(s) if s.trim().is_empty() => Err(ScreenerError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_page_size(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let Some(raw) = config.get_string("table", "page_size") else {
        return Ok(());
    };
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ScreenerError::ConfigInvalid {
            section: "table".to_string(),
            key: "page_size".to_string(),
            reason: format!("page_size must be an integer, got '{}'", raw.trim()),
        })?;
    if value < 1 {
        return Err(ScreenerError::ConfigInvalid {
            section: "table".to_string(),
            key: "page_size".to_string(),
            reason: "page_size must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_listen(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let Some(raw) = config.get_string("web", "listen") else {
        return Ok(());
    };
    raw.trim()
        .parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|e| ScreenerError::ConfigInvalid {
            section: "web".to_string(),
            key: "listen".to_string(),
            reason: format!("invalid socket address '{}': {}", raw.trim(), e),
        })
}
