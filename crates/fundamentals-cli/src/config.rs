use analysis_core::DetailLevel;
use anyhow::{Context, Result};
use std::env;

/// Defaults for the summary binary, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub default_level: DetailLevel,  // SUMMARY_DETAIL_LEVEL
    pub pretty_json: bool,           // SUMMARY_PRETTY_JSON
}

impl CliConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            default_level: lookup("SUMMARY_DETAIL_LEVEL")
                .unwrap_or_else(|| "standard".to_string())
                .parse()
                .context("SUMMARY_DETAIL_LEVEL")?,
            pretty_json: lookup("SUMMARY_PRETTY_JSON")
                .unwrap_or_else(|| "true".to_string())
                .trim()
                .to_lowercase()
                .parse()
                .context("SUMMARY_PRETTY_JSON must be true or false")?,
        };
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.default_level, DetailLevel::Standard);
        assert!(config.pretty_json);
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::from_lookup(lookup(&[
            ("SUMMARY_DETAIL_LEVEL", "Detailed"),
            ("SUMMARY_PRETTY_JSON", "FALSE"),
        ]))
        .unwrap();
        assert_eq!(config.default_level, DetailLevel::Detailed);
        assert!(!config.pretty_json);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = CliConfig::from_lookup(lookup(&[("SUMMARY_DETAIL_LEVEL", "huge")])).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid detail level"));
    }
}
