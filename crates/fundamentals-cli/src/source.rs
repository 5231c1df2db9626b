use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use analysis_core::{RawRecord, RecordSource, SummaryError};

/// Reads raw records from a JSON file, a directory of `<SYMBOL>.json` files,
/// or stdin (`-`).
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    input: PathBuf,
}

impl JsonFileSource {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
        }
    }

    fn read_text(&self, symbol: &str) -> Result<String, SummaryError> {
        if self.input.as_os_str() == "-" {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| SummaryError::Source(format!("stdin: {e}")))?;
            return Ok(text);
        }

        let path = if self.input.is_dir() {
            if symbol.trim().is_empty() {
                return Err(SummaryError::Source(format!(
                    "{} is a directory; a symbol is required to pick a record",
                    self.input.display()
                )));
            }
            self.input.join(format!("{}.json", symbol.trim().to_uppercase()))
        } else {
            self.input.clone()
        };
        tracing::debug!(path = %path.display(), "reading raw record");
        fs::read_to_string(&path).map_err(|e| SummaryError::Source(format!("{}: {e}", path.display())))
    }
}

impl RecordSource for JsonFileSource {
    /// A record without its own symbol takes the requested one.
    fn load(&self, symbol: &str) -> Result<RawRecord, SummaryError> {
        let text = self.read_text(symbol)?;
        let mut record = RawRecord::from_json_str(&text)?;
        if record.symbol.is_none() && !symbol.is_empty() {
            record.symbol = Some(symbol.to_string());
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fundamentals-cli-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_from_directory_by_symbol() {
        let dir = scratch_dir("dir");
        fs::write(dir.join("IBM.json"), r#"{"symbol": "IBM", "metric": {"peTTM": 21.0}}"#).unwrap();

        let record = JsonFileSource::new(&dir).load("ibm").unwrap();
        assert_eq!(record.symbol.as_deref(), Some("IBM"));
        assert_eq!(record.metric.len(), 1);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_symbol_is_filled_in() {
        let dir = scratch_dir("file");
        let path = dir.join("record.json");
        fs::write(&path, r#"{"metric": {}}"#).unwrap();

        let record = JsonFileSource::new(&path).load("KO").unwrap();
        assert_eq!(record.symbol.as_deref(), Some("KO"));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_unreadable_input_is_a_source_error() {
        let err = JsonFileSource::new("/definitely/not/here.json").load("X").unwrap_err();
        assert!(matches!(err, SummaryError::Source(ref msg) if msg.contains("/definitely/not/here.json")));
        assert!(err.to_string().starts_with("Record source error:"));
    }

    #[test]
    fn test_directory_input_requires_a_symbol() {
        let dir = scratch_dir("nosymbol");
        fs::write(dir.join(".json"), r#"{"symbol": "HIDDEN"}"#).unwrap();

        let err = JsonFileSource::new(&dir).load("").unwrap_err();
        assert!(matches!(err, SummaryError::Source(ref msg) if msg.contains("symbol is required")));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_structural_defects_stay_malformed() {
        let dir = scratch_dir("malformed");
        let path = dir.join("record.json");
        fs::write(&path, r#"{"metric": [1, 2]}"#).unwrap();

        let err = JsonFileSource::new(&path).load("X").unwrap_err();
        assert!(matches!(err, SummaryError::MalformedRecord(_)));

        fs::remove_dir_all(dir).ok();
    }
}
