// Upstream price data ingestion
pub mod csv_parser;
pub mod market_data;

pub use csv_parser::PriceBarCsvParser;
pub use market_data::{bars_for_symbol, closing_prices};
