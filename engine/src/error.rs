use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    // Not enough prices to anchor a computation (e.g. an empty series at the synthesizer)
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    // Out-of-range model configuration. Never clamped.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid price at index {index}: {value}")]
    InvalidPrice { index: usize, value: f64 },

    #[error("Indicator calculation error: {0}")]
    IndicatorError(String),

    // Finite prices whose prediction cannot be represented (e.g. last * 2 beyond f64::MAX)
    #[error("Numerical error: {0}")]
    NumericalError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
}

impl EngineError {
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, EngineError::ConfigError(_))
    }

    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, EngineError::InsufficientData(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::ConfigError("confidence threshold 120 outside [0, 100]".to_string());
        assert!(err.is_configuration_error());
        assert_eq!(err.to_string(), "Configuration error: confidence threshold 120 outside [0, 100]");

        let err = EngineError::InvalidPrice { index: 3, value: f64::NAN };
        assert_eq!(err.to_string(), "Invalid price at index 3: NaN");
    }

    #[test]
    fn test_csv_error_conversion() {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b\nc".as_bytes());
        let csv_err = rdr.records().find_map(|r| r.err()).unwrap();
        let err: EngineError = csv_err.into();
        assert!(matches!(err, EngineError::CsvSystemError { .. }));
        assert!(err.to_string().starts_with("CSV parsing system error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EngineError = io.into();
        assert!(err.to_string().contains("I/O error"));
        assert!(!err.is_insufficient_data());
    }
}
