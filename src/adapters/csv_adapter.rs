//! CSV file record source.
//!
//! The header row names the columns: `ticker` is required, metric columns use
//! the metric identifiers (`roe`, `peRatio`, ...) in any order, and unknown
//! columns are ignored.

use crate::domain::error::ScreenerError;
use crate::domain::stock::{Metric, Stock};
use crate::ports::stock_port::StockPort;
use std::fs;
use std::path::PathBuf;

pub struct CsvStockAdapter {
    path: PathBuf,
}

impl CsvStockAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn parse(content: &str) -> Result<Vec<Stock>, ScreenerError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr.headers().map_err(|e| ScreenerError::DataFormat {
            reason: format!("CSV header error: {}", e),
        })?;

        let ticker_idx = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case("ticker"))
            .ok_or_else(|| ScreenerError::DataFormat {
                reason: "missing ticker column".into(),
            })?;
        let metric_columns: Vec<(usize, Metric)> = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| h.parse::<Metric>().ok().map(|m| (idx, m)))
            .collect();

        let mut stocks = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| ScreenerError::DataFormat {
                reason: format!("CSV parse error: {}", e),
            })?;

            let ticker = record.get(ticker_idx).unwrap_or_default();
            if ticker.is_empty() {
                // Header is line 1.
                tracing::warn!(line = row + 2, "skipping CSV row without a ticker");
                continue;
            }

            let mut stock = Stock::new(ticker);
            for &(idx, metric) in &metric_columns {
                let value = record.get(idx).and_then(|cell| cell.parse::<f64>().ok());
                stock.set_metric(metric, value);
            }
            stocks.push(stock);
        }

        Ok(stocks)
    }
}

impl StockPort for CsvStockAdapter {
    fn load_stocks(&self) -> Result<Vec<Stock>, ScreenerError> {
        let content = fs::read_to_string(&self.path).map_err(|e| ScreenerError::DataSource {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let stocks = Self::parse(&content)?;
        tracing::info!(count = stocks.len(), source = %self.describe(), "loaded stocks");
        Ok(stocks)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
