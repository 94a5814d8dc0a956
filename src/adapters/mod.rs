//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod json_adapter;
#[cfg(feature = "web")]
pub mod web;

use crate::ports::stock_port::StockPort;
use csv_adapter::CsvStockAdapter;
use json_adapter::JsonStockAdapter;
use std::path::Path;

/// Pick the record source for a data path: CSV by extension, JSON otherwise,
/// and the bundled data set when no path is configured.
pub fn stock_port_for(path: Option<&Path>) -> Box<dyn StockPort + Send + Sync> {
    match path {
        None => Box::new(JsonStockAdapter::embedded()),
        Some(p)
            if p
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv")) =>
        {
            Box::new(CsvStockAdapter::new(p))
        }
        Some(p) => Box::new(JsonStockAdapter::from_path(p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chooses_adapter_by_extension() {
        assert_eq!(stock_port_for(None).describe(), "bundled data set");
        assert_eq!(
            stock_port_for(Some(Path::new("a/b.CSV"))).describe(),
            "a/b.CSV"
        );
        assert_eq!(
            stock_port_for(Some(Path::new("a/b.json"))).describe(),
            "a/b.json"
        );
    }

    #[test]
    fn csv_extension_selects_csv_parser() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stocks.csv");
        std::fs::write(&path, "ticker,roe\nA,1\n").unwrap();
        let stocks = stock_port_for(Some(&path)).load_stocks().unwrap();
        assert_eq!(stocks.len(), 1);
    }
}
