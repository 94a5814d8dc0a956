//! Stock record model.
//!
//! - `Metric`: the nine numeric attributes a query may filter on
//! - `Stock`: one row of the screening table
//! - `Column`: a displayable/sortable table column (ticker or a metric)

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    MarketCapitalization,
    PeRatio,
    Roe,
    DebtToEquity,
    DividendYield,
    RevenueGrowth,
    EpsGrowth,
    CurrentRatio,
    GrossMargin,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::MarketCapitalization,
        Metric::PeRatio,
        Metric::Roe,
        Metric::DebtToEquity,
        Metric::DividendYield,
        Metric::RevenueGrowth,
        Metric::EpsGrowth,
        Metric::CurrentRatio,
        Metric::GrossMargin,
    ];

    /// Attribute identifier used in data files and URLs.
    pub fn identifier(self) -> &'static str {
        match self {
            Metric::MarketCapitalization => "marketCapitalization",
            Metric::PeRatio => "peRatio",
            Metric::Roe => "roe",
            Metric::DebtToEquity => "debtToEquity",
            Metric::DividendYield => "dividendYield",
            Metric::RevenueGrowth => "revenueGrowth",
            Metric::EpsGrowth => "epsGrowth",
            Metric::CurrentRatio => "currentRatio",
            Metric::GrossMargin => "grossMargin",
        }
    }

    /// Lower-cased human label accepted in query text.
    pub fn label(self) -> &'static str {
        match self {
            Metric::MarketCapitalization => "market capitalization",
            Metric::PeRatio => "p/e ratio",
            Metric::Roe => "roe",
            Metric::DebtToEquity => "debt-to-equity ratio",
            Metric::DividendYield => "dividend yield",
            Metric::RevenueGrowth => "revenue growth",
            Metric::EpsGrowth => "eps growth",
            Metric::CurrentRatio => "current ratio",
            Metric::GrossMargin => "gross margin",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Metric::MarketCapitalization => "Market Capitalization (B)",
            Metric::PeRatio => "P/E Ratio",
            Metric::Roe => "ROE (%)",
            Metric::DebtToEquity => "Debt-to-Equity",
            Metric::DividendYield => "Dividend Yield (%)",
            Metric::RevenueGrowth => "Revenue Growth (%)",
            Metric::EpsGrowth => "EPS Growth (%)",
            Metric::CurrentRatio => "Current Ratio",
            Metric::GrossMargin => "Gross Margin (%)",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.identifier() == s)
            .ok_or_else(|| format!("unknown metric '{}'", s))
    }
}

/// A single stock row. Metric values that were not numbers in the source are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub ticker: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub market_capitalization: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pe_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub roe: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub debt_to_equity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub dividend_yield: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub revenue_growth: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub eps_growth: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub gross_margin: Option<f64>,
}

impl Stock {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set_metric(metric, Some(value));
        self
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::MarketCapitalization => self.market_capitalization,
            Metric::PeRatio => self.pe_ratio,
            Metric::Roe => self.roe,
            Metric::DebtToEquity => self.debt_to_equity,
            Metric::DividendYield => self.dividend_yield,
            Metric::RevenueGrowth => self.revenue_growth,
            Metric::EpsGrowth => self.eps_growth,
            Metric::CurrentRatio => self.current_ratio,
            Metric::GrossMargin => self.gross_margin,
        }
    }

    pub fn set_metric(&mut self, metric: Metric, value: Option<f64>) {
        let slot = match metric {
            Metric::MarketCapitalization => &mut self.market_capitalization,
            Metric::PeRatio => &mut self.pe_ratio,
            Metric::Roe => &mut self.roe,
            Metric::DebtToEquity => &mut self.debt_to_equity,
            Metric::DividendYield => &mut self.dividend_yield,
            Metric::RevenueGrowth => &mut self.revenue_growth,
            Metric::EpsGrowth => &mut self.eps_growth,
            Metric::CurrentRatio => &mut self.current_ratio,
            Metric::GrossMargin => &mut self.gross_margin,
        };
        *slot = value;
    }

    /// Cell text for a column; non-numeric metrics render as `-`.
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Ticker => self.ticker.clone(),
            Column::Metric(m) => match self.metric(m) {
                Some(v) => v.to_string(),
                None => "-".to_string(),
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Other(serde::de::IgnoredAny),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Number(v) => Ok(Some(v)),
        LooseNumber::Other(_) => {
            tracing::debug!("non-numeric metric value treated as missing");
            Ok(None)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Ticker,
    Metric(Metric),
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Ticker,
        Column::Metric(Metric::MarketCapitalization),
        Column::Metric(Metric::PeRatio),
        Column::Metric(Metric::Roe),
        Column::Metric(Metric::DebtToEquity),
        Column::Metric(Metric::DividendYield),
        Column::Metric(Metric::RevenueGrowth),
        Column::Metric(Metric::EpsGrowth),
        Column::Metric(Metric::CurrentRatio),
        Column::Metric(Metric::GrossMargin),
    ];

    pub fn identifier(self) -> &'static str {
        match self {
            Column::Ticker => "ticker",
            Column::Metric(m) => m.identifier(),
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Column::Ticker => "Ticker",
            Column::Metric(m) => m.header(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ticker" {
            return Ok(Column::Ticker);
        }
        s.parse::<Metric>()
            .map(Column::Metric)
            .map_err(|_| format!("unknown column '{}'", s))
    }
}
