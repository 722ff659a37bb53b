use crate::error::EngineError;
use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::PriceBar;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// Accepts RFC 3339 timestamps or plain dates (taken as midnight UTC)
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, EngineError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| EngineError::CsvDataFormatError(format!("Failed to parse timestamp '{}': {}", s, e)))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| EngineError::CsvDataFormatError(format!("Invalid date '{}'", s)))?;
    Ok(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

pub fn parse_price(s: &str) -> Result<f64, EngineError> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|e| EngineError::CsvDataFormatError(format!("Failed to parse number '{}': {}", s, e)))?;
    if !value.is_finite() {
        return Err(EngineError::CsvDataFormatError(format!("Non-finite number '{}'", s)));
    }
    Ok(value)
}

pub struct PriceBarCsvParser;

impl PriceBarCsvParser {
    // CSV Header: timestamp,open,high,low,close,volume (optional leading `symbol` column)
    // Example Row: 2024-01-02,187.15,188.44,183.89,185.64,82488700
    pub fn load_bars_from_csv(file_path: impl AsRef<Path>, default_symbol: &str) -> Result<Vec<PriceBar>, EngineError> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path).map_err(|e| {
            tracing::error!(path = %file_path.display(), error = %e, "Failed to open CSV file");
            EngineError::from(e)
        })?;
        let bars = Self::read_bars(BufReader::new(file), default_symbol)?;
        tracing::info!(path = %file_path.display(), count = bars.len(), "Loaded price bars from CSV");
        Ok(bars)
    }

    pub fn read_bars<R: Read>(reader: R, default_symbol: &str) -> Result<Vec<PriceBar>, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut bars = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2; // header is line 1
            let record = result?;

            let symbol = Self::get_field(&record, &headers, "symbol")
                .filter(|s| !s.is_empty())
                .unwrap_or(default_symbol);
            let required = |name: &str| {
                Self::get_field(&record, &headers, name).ok_or_else(|| {
                    EngineError::CsvDataFormatError(format!("Missing '{}' field in CSV record at line {}", name, line))
                })
            };
            let at_line = |name: &str, e: EngineError| {
                EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: {}", name, line, e))
            };
            let number = |name: &str| required(name).and_then(|raw| parse_price(raw).map_err(|e| at_line(name, e)));

            let timestamp = parse_timestamp(required("timestamp")?).map_err(|e| at_line("timestamp", e))?;

            bars.push(PriceBar {
                symbol: symbol.to_string(),
                timestamp,
                open: number("open")?,
                high: number("high")?,
                low: number("low")?,
                close: number("close")?,
                volume: number("volume")?,
            });
        }
        Ok(bars)
    }

    // Header lookup is case-insensitive so provider exports with "Close" etc. still load
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|pos| record.get(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let dt = parse_timestamp("2024-12-30").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2024, 12, 30, 0));

        let dt = parse_timestamp("2024-12-30T18:20:00-03:00").unwrap();
        assert_eq!((dt.day(), dt.hour(), dt.minute()), (30, 21, 20));

        assert!(parse_timestamp("30/12/2024").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(" 123.45 ").unwrap(), 123.45);
        assert!(parse_price("abc").is_err());
        assert!(parse_price("NaN").is_err());
    }

    #[test]
    fn test_load_bars_from_csv_valid_data() {
        let csv_content = "\
timestamp,open,high,low,close,volume
2024-01-02,187.15,188.44,183.89,185.64,82488700
2024-01-03,184.22,185.88,183.43,184.25,58414500";
        let tmp_file = create_test_csv(csv_content);
        let bars = PriceBarCsvParser::load_bars_from_csv(tmp_file.path(), "AAPL").unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].symbol, "AAPL");
        assert_eq!(bars[0].timestamp, parse_timestamp("2024-01-02").unwrap());
        assert_eq!(bars[0].open, 187.15);
        assert_eq!(bars[0].close, 185.64);
        assert_eq!(bars[1].volume, 58414500.0);
    }

    #[test]
    fn test_symbol_column_and_header_case() {
        let csv_content = "\
Symbol,Timestamp,Open,High,Low,Close,Volume
BTC,2024-01-02T00:00:00Z,42000,45000,41500,44900.5,1200";
        let bars = PriceBarCsvParser::read_bars(csv_content.as_bytes(), "FALLBACK").unwrap();
        assert_eq!(bars[0].symbol, "BTC");
        assert_eq!(bars[0].close, 44900.5);
    }

    #[test]
    fn test_load_bars_from_csv_empty_file() {
        let tmp_file = create_test_csv("timestamp,open,high,low,close,volume"); // Only header
        let bars = PriceBarCsvParser::load_bars_from_csv(tmp_file.path(), "FALLBACK").unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn test_load_bars_from_csv_missing_field() {
        let csv_content = "\
timestamp,open,high,low,close
2024-01-02,187.15,188.44,183.89,185.64"; // Missing volume
        let err = PriceBarCsvParser::read_bars(csv_content.as_bytes(), "FALLBACK").unwrap_err();
        assert!(matches!(err, EngineError::CsvDataFormatError(_)));
        assert!(err.to_string().contains("Missing 'volume' field in CSV record at line 2"), "{}", err);
    }

    #[test]
    fn test_load_bars_from_csv_invalid_data_format() {
        let csv_content = "\
timestamp,open,high,low,close,volume
2024-01-02,187.15,188.44,183.89,invalid,82488700";
        let err = PriceBarCsvParser::read_bars(csv_content.as_bytes(), "FALLBACK").unwrap_err();
        assert!(matches!(err, EngineError::CsvDataFormatError(_)));
        let message = err.to_string();
        assert!(message.contains("Error parsing 'close' at line 2"), "{}", message);
    }

    #[test]
    fn test_missing_file() {
        let err = PriceBarCsvParser::load_bars_from_csv("does/not/exist.csv", "X").unwrap_err();
        assert!(matches!(err, EngineError::IoError { .. }));
    }

    #[test]
    fn test_ragged_row_is_csv_system_error() {
        let csv_content = "\
timestamp,open,high,low,close,volume
2024-01-02,187.15,188.44";
        let err = PriceBarCsvParser::read_bars(csv_content.as_bytes(), "FALLBACK").unwrap_err();
        assert!(matches!(err, EngineError::CsvSystemError { .. }), "{:?}", err);
    }
}
