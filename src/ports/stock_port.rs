//! Record source port.

use crate::domain::error::ScreenerError;
use crate::domain::stock::Stock;

/// Supplies the full record set to be screened.
pub trait StockPort {
    fn load_stocks(&self) -> Result<Vec<Stock>, ScreenerError>;

    /// Where the records come from, for log and progress messages.
    fn describe(&self) -> String;
}
