// Turns upstream price bars into the closing-price series the engine consumes
use shared::models::PriceBar;

/// Sorts bars by timestamp (stable), keeps the first bar for a repeated
/// timestamp, and returns their closes. Missing days are not detected.
pub fn closing_prices<'a, I>(bars: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a PriceBar>,
{
    let mut ordered: Vec<&PriceBar> = bars.into_iter().collect();
    ordered.sort_by_key(|bar| bar.timestamp);

    let before = ordered.len();
    ordered.dedup_by_key(|bar| bar.timestamp);
    if ordered.len() != before {
        tracing::warn!(dropped = before - ordered.len(), "Dropped price bars with duplicate timestamps");
    }

    ordered.into_iter().map(|bar| bar.close).collect()
}

/// Bars belonging to `symbol` only (case-insensitive).
pub fn bars_for_symbol<'a>(bars: &'a [PriceBar], symbol: &str) -> Vec<&'a PriceBar> {
    bars.iter().filter(|bar| bar.symbol.eq_ignore_ascii_case(symbol)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bar(symbol: &str, day: u32, close: f64) -> PriceBar {
        PriceBar {
            symbol: symbol.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }

    #[test]
    fn test_closing_prices_ascending() {
        let bars = vec![bar("AAPL", 3, 103.0), bar("AAPL", 1, 101.0), bar("AAPL", 2, 102.0)];
        assert_eq!(closing_prices(&bars), vec![101.0, 102.0, 103.0]);
    }

    #[test]
    fn test_duplicate_timestamps_keep_first() {
        let bars = vec![bar("AAPL", 1, 101.0), bar("AAPL", 2, 102.0), bar("AAPL", 2, 999.0)];
        assert_eq!(closing_prices(&bars), vec![101.0, 102.0]);
    }

    #[test]
    fn test_empty_bars() {
        assert!(closing_prices(Vec::<PriceBar>::new().iter()).is_empty());
    }

    #[test]
    fn test_bars_for_symbol() {
        let bars = vec![bar("AAPL", 1, 1.0), bar("MSFT", 1, 2.0), bar("aapl", 2, 3.0)];
        let selected = bars_for_symbol(&bars, "AAPL");
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[1].close, 3.0);
        assert_eq!(closing_prices(selected), vec![1.0, 3.0]);
    }
}
