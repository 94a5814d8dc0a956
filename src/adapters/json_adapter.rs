//! JSON record source: a file on disk or the bundled data set.

use crate::domain::error::ScreenerError;
use crate::domain::stock::Stock;
use crate::ports::stock_port::StockPort;
use std::fs;
use std::path::PathBuf;

const EMBEDDED_STOCKS: &str = include_str!("../../data/stocks.json");

enum Source {
    File(PathBuf),
    Embedded,
}

pub struct JsonStockAdapter {
    source: Source,
}

impl JsonStockAdapter {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
        }
    }

    /// The static mock data set compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            source: Source::Embedded,
        }
    }

    /// Parse a JSON array of stock records.
    pub fn parse(content: &str) -> Result<Vec<Stock>, ScreenerError> {
        serde_json::from_str(content).map_err(|e| ScreenerError::DataFormat {
            reason: format!("invalid JSON: {}", e),
        })
    }
}

impl StockPort for JsonStockAdapter {
    fn load_stocks(&self) -> Result<Vec<Stock>, ScreenerError> {
        let stocks = match &self.source {
            Source::Embedded => Self::parse(EMBEDDED_STOCKS)?,
            Source::File(path) => {
                let content =
                    fs::read_to_string(path).map_err(|e| ScreenerError::DataSource {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    })?;
                Self::parse(&content)?
            }
        };
        tracing::info!(count = stocks.len(), source = %self.describe(), "loaded stocks");
        Ok(stocks)
    }

    fn describe(&self) -> String {
        match &self.source {
            Source::File(path) => path.display().to_string(),
            Source::Embedded => "bundled data set".to_string(),
        }
    }
}
