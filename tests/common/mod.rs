#![allow(dead_code)]

use stockscreen::domain::error::ScreenerError;
use stockscreen::domain::stock::{Metric, Stock};
use stockscreen::ports::stock_port::StockPort;

pub struct MockStockPort {
    pub stocks: Vec<Stock>,
    pub error: Option<String>,
}

impl MockStockPort {
    pub fn new(stocks: Vec<Stock>) -> Self {
        Self {
            stocks,
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            stocks: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl StockPort for MockStockPort {
    fn load_stocks(&self) -> Result<Vec<Stock>, ScreenerError> {
        match &self.error {
            Some(reason) => Err(ScreenerError::DataSource {
                path: "mock".to_string(),
                reason: reason.clone(),
            }),
            None => Ok(self.stocks.clone()),
        }
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

/// A stock with every metric set from `(metric, value)` pairs; the rest missing.
pub fn make_stock(ticker: &str, values: &[(Metric, f64)]) -> Stock {
    values
        .iter()
        .fold(Stock::new(ticker), |stock, &(metric, value)| {
            stock.with(metric, value)
        })
}

/// `count` stocks named `T00`, `T01`, ... with ROE equal to their index and
/// market capitalization `1000 * index`.
pub fn generate_stocks(count: usize) -> Vec<Stock> {
    (0..count)
        .map(|i| {
            make_stock(
                &format!("T{:02}", i),
                &[
                    (Metric::Roe, i as f64),
                    (Metric::MarketCapitalization, 1000.0 * i as f64),
                ],
            )
        })
        .collect()
}

pub fn tickers(rows: &[&Stock]) -> Vec<String> {
    rows.iter().map(|s| s.ticker.clone()).collect()
}

pub fn sample_stocks() -> Vec<Stock> {
    vec![
        make_stock(
            "AAPL",
            &[
                (Metric::MarketCapitalization, 2800.0),
                (Metric::PeRatio, 28.5),
                (Metric::Roe, 150.0),
                (Metric::DividendYield, 0.5),
            ],
        ),
        make_stock(
            "MSFT",
            &[
                (Metric::MarketCapitalization, 15000.0),
                (Metric::PeRatio, 32.0),
                (Metric::Roe, 40.0),
                (Metric::DividendYield, 0.8),
            ],
        ),
        make_stock(
            "BHP",
            &[
                (Metric::MarketCapitalization, 12000.0),
                (Metric::PeRatio, 11.0),
                (Metric::Roe, 12.0),
                (Metric::DividendYield, 5.6),
            ],
        ),
        make_stock(
            "CBA",
            &[
                (Metric::MarketCapitalization, 11000.0),
                (Metric::PeRatio, 19.5),
                (Metric::Roe, 16.0),
                (Metric::DividendYield, 4.1),
            ],
        ),
        make_stock("NODATA", &[]),
    ]
}
