use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::SummaryError;

/// One observation of a reported time series.
///
/// Provider fields beyond `v` and `period` are kept in `extra` and written back
/// out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub v: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeriesPoint {
    pub fn new(v: f64, period: impl Into<String>) -> Self {
        Self {
            v,
            period: Some(period.into()),
            extra: Map::new(),
        }
    }
}

/// Metric name -> observations, most recent first as delivered by the provider.
pub type SeriesMap = BTreeMap<String, Vec<SeriesPoint>>;

/// Quarterly and annual time series attached to a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesSet {
    #[serde(default)]
    pub quarterly: SeriesMap,
    #[serde(default)]
    pub annual: SeriesMap,
}

/// Provider-shaped financial metrics for one company.
///
/// `metric` keeps the raw JSON values so that views which pass data through
/// untouched (the structured compression) see exactly what the provider sent.
/// Numeric readers treat anything that is not a JSON number as unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawRecord {
    pub symbol: Option<String>,
    pub metric: BTreeMap<String, Value>,
    pub series: SeriesSet,
}

impl RawRecord {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Default::default()
        }
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: f64) -> Self {
        self.metric.insert(key.into(), Value::from(value));
        self
    }

    pub fn with_quarterly(mut self, name: impl Into<String>, values: &[f64]) -> Self {
        self.series.quarterly.insert(name.into(), points(values));
        self
    }

    pub fn with_annual(mut self, name: impl Into<String>, values: &[f64]) -> Self {
        self.series.annual.insert(name.into(), points(values));
        self
    }

    /// Build a record from a decoded JSON document.
    ///
    /// Absent sections default to empty. A `metric`, `series`,
    /// `series.quarterly` or `series.annual` that is present but not an
    /// object, or a series that is not a list of `{v: number}` points, is a
    /// `MalformedRecord`.
    pub fn from_value(value: Value) -> Result<Self, SummaryError> {
        let Value::Object(mut root) = value else {
            return Err(SummaryError::MalformedRecord(format!(
                "record must be an object, got {}",
                json_kind(&value)
            )));
        };

        let symbol = match root.remove("symbol") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        let metric = match root.remove("metric") {
            None => BTreeMap::new(),
            Some(Value::Object(map)) => map.into_iter().collect(),
            Some(other) => {
                tracing::warn!(kind = json_kind(&other), "rejecting record: metric is not a mapping");
                return Err(SummaryError::MalformedRecord(format!(
                    "metric must be an object, got {}",
                    json_kind(&other)
                )));
            }
        };

        let series = match root.remove("series") {
            None => SeriesSet::default(),
            Some(Value::Object(mut sections)) => SeriesSet {
                quarterly: parse_series_section("quarterly", sections.remove("quarterly"))?,
                annual: parse_series_section("annual", sections.remove("annual"))?,
            },
            Some(other) => {
                tracing::warn!(kind = json_kind(&other), "rejecting record: series is not a mapping");
                return Err(SummaryError::MalformedRecord(format!(
                    "series must be an object, got {}",
                    json_kind(&other)
                )));
            }
        };

        Ok(Self {
            symbol,
            metric,
            series,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, SummaryError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }
}

impl TryFrom<Value> for RawRecord {
    type Error = SummaryError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl FromStr for RawRecord {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

fn points(values: &[f64]) -> Vec<SeriesPoint> {
    values
        .iter()
        .map(|&v| SeriesPoint {
            v,
            period: None,
            extra: Map::new(),
        })
        .collect()
}

fn parse_series_section(name: &str, section: Option<Value>) -> Result<SeriesMap, SummaryError> {
    let entries: Map<String, Value> = match section {
        None => return Ok(SeriesMap::new()),
        Some(Value::Object(map)) => map,
        Some(other) => {
            tracing::warn!(section = name, kind = json_kind(&other), "rejecting record: series section is not a mapping");
            return Err(SummaryError::MalformedRecord(format!(
                "series.{name} must be an object, got {}",
                json_kind(&other)
            )));
        }
    };

    entries
        .into_iter()
        .map(|(metric, raw)| {
            serde_json::from_value::<Vec<SeriesPoint>>(raw)
                .map(|series| (metric.clone(), series))
                .map_err(|e| SummaryError::MalformedRecord(format!("series.{name}.{metric}: {e}")))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Output fidelity tier for the compressed views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Brief,
    Standard,
    Detailed,
    Structured,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 4] = [
        DetailLevel::Brief,
        DetailLevel::Standard,
        DetailLevel::Detailed,
        DetailLevel::Structured,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Brief => "brief",
            DetailLevel::Standard => "standard",
            DetailLevel::Detailed => "detailed",
            DetailLevel::Structured => "structured",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailLevel {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SummaryError::InvalidDetailLevel(s.to_string()))
    }
}

/// Qualitative label for the additive 0-10 health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthLabel {
    Strong,
    Good,
    Fair,
    Weak,
}

impl HealthLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 8 => HealthLabel::Strong,
            s if s >= 5 => HealthLabel::Good,
            s if s >= 3 => HealthLabel::Fair,
            _ => HealthLabel::Weak,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLabel::Strong => "Strong",
            HealthLabel::Good => "Good",
            HealthLabel::Fair => "Fair",
            HealthLabel::Weak => "Weak",
        }
    }
}

impl fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a metric given its growth rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    #[serde(rename = "strong growth")]
    StrongGrowth,
    #[serde(rename = "moderate growth")]
    ModerateGrowth,
    #[serde(rename = "stable")]
    Stable,
    #[serde(rename = "slight decline")]
    SlightDecline,
    #[serde(rename = "declining")]
    Declining,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::StrongGrowth => "strong growth",
            TrendDirection::ModerateGrowth => "moderate growth",
            TrendDirection::Stable => "stable",
            TrendDirection::SlightDecline => "slight decline",
            TrendDirection::Declining => "declining",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
