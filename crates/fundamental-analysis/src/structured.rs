//! Structured compression: the whole raw metric mapping regrouped by key name.
//!
//! Buckets are an ordered list of independent predicates over the raw key.
//! A key lands in every bucket whose predicate matches, and in none when no
//! predicate matches.

use std::collections::BTreeMap;
use std::fmt;

use analysis_core::{SeriesMap, SummaryError};
use serde::Serialize;
use serde_json::Value;

use crate::snapshot::MetricsSnapshot;

/// Most recent quarterly observations kept per series
pub const QUARTERLY_POINTS_KEPT: usize = 4;
/// Most recent annual observations kept per series
pub const ANNUAL_POINTS_KEPT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Valuation,
    Profitability,
    Growth,
    Health,
    Performance,
    Efficiency,
    Dividend,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Valuation => "valuation",
            Bucket::Profitability => "profitability",
            Bucket::Growth => "growth",
            Bucket::Health => "health",
            Bucket::Performance => "performance",
            Bucket::Efficiency => "efficiency",
            Bucket::Dividend => "dividend",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct BucketRule {
    bucket: Bucket,
    matches: fn(&str) -> bool,
    /// Removed from the key, in order, to form the bucket-local name
    strip: &'static [&'static str],
}

fn contains_any(key: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| key.contains(needle))
}

fn bucket_rules() -> [BucketRule; 7] {
    [
        BucketRule {
            bucket: Bucket::Valuation,
            matches: |k| contains_any(k, &["pe", "pb", "ps", "peg", "ev", "pfcf", "pcf"]),
            strip: &["TTM", "Annual", "Quarterly"],
        },
        BucketRule {
            bucket: Bucket::Profitability,
            matches: |k| contains_any(k, &["eps", "roe", "roa", "roi", "margin", "roic"]),
            strip: &["TTM", "Annual"],
        },
        BucketRule {
            bucket: Bucket::Growth,
            matches: |k| contains_any(k, &["Growth", "Cagr"]),
            strip: &[],
        },
        BucketRule {
            bucket: Bucket::Health,
            matches: |k| contains_any(k, &["Debt", "Ratio", "cash"]),
            strip: &["Quarterly", "Annual"],
        },
        BucketRule {
            bucket: Bucket::Performance,
            matches: |k| contains_any(k, &["Return", "Week"]) || k.to_lowercase().contains("beta"),
            strip: &[],
        },
        BucketRule {
            bucket: Bucket::Efficiency,
            matches: |k| contains_any(k, &["Turnover", "Employee"]),
            strip: &[],
        },
        BucketRule {
            bucket: Bucket::Dividend,
            matches: |k| {
                let lower = k.to_lowercase();
                lower.contains("dividend") || lower.contains("payout")
            },
            strip: &[],
        },
    ]
}

fn strip_all(key: &str, fragments: &[&str]) -> String {
    fragments
        .iter()
        .fold(key.to_string(), |name, fragment| name.replace(fragment, ""))
}

/// Every bucket a raw key belongs to, with its bucket-local name
pub fn classify_key(key: &str) -> Vec<(Bucket, String)> {
    bucket_rules()
        .iter()
        .filter(|rule| (rule.matches)(key))
        .map(|rule| (rule.bucket, strip_all(key, rule.strip)))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuredCompression {
    pub symbol: Option<String>,
    pub valuation: BTreeMap<String, Value>,
    pub profitability: BTreeMap<String, Value>,
    pub growth: BTreeMap<String, Value>,
    pub health: BTreeMap<String, Value>,
    pub performance: BTreeMap<String, Value>,
    pub efficiency: BTreeMap<String, Value>,
    pub dividend: BTreeMap<String, Value>,
    pub trends_quarterly: SeriesMap,
    pub trends_annual: SeriesMap,
}

impl StructuredCompression {
    pub fn from_snapshot(snapshot: &MetricsSnapshot<'_>) -> Self {
        let record = snapshot.record();
        let mut out = Self {
            symbol: record.symbol.clone(),
            trends_quarterly: truncate_series(&record.series.quarterly, QUARTERLY_POINTS_KEPT),
            trends_annual: truncate_series(&record.series.annual, ANNUAL_POINTS_KEPT),
            ..Default::default()
        };

        // Keys iterate in sorted order, so on a name collision the
        // lexicographically later raw key wins.
        for (key, value) in &record.metric {
            for (bucket, local_name) in classify_key(key) {
                if let Some(previous) = out.bucket_mut(bucket).insert(local_name.clone(), value.clone()) {
                    tracing::debug!(
                        bucket = bucket.as_str(),
                        key = key.as_str(),
                        local_name = local_name.as_str(),
                        replaced = %previous,
                        "structured bucket name collision"
                    );
                }
            }
        }

        out
    }

    pub fn bucket(&self, bucket: Bucket) -> &BTreeMap<String, Value> {
        match bucket {
            Bucket::Valuation => &self.valuation,
            Bucket::Profitability => &self.profitability,
            Bucket::Growth => &self.growth,
            Bucket::Health => &self.health,
            Bucket::Performance => &self.performance,
            Bucket::Efficiency => &self.efficiency,
            Bucket::Dividend => &self.dividend,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut BTreeMap<String, Value> {
        match bucket {
            Bucket::Valuation => &mut self.valuation,
            Bucket::Profitability => &mut self.profitability,
            Bucket::Growth => &mut self.growth,
            Bucket::Health => &mut self.health,
            Bucket::Performance => &mut self.performance,
            Bucket::Efficiency => &mut self.efficiency,
            Bucket::Dividend => &mut self.dividend,
        }
    }

    pub fn to_value(&self) -> Result<Value, SummaryError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SummaryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn truncate_series(series: &SeriesMap, keep: usize) -> SeriesMap {
    series
        .iter()
        .map(|(name, points)| (name.clone(), points.iter().take(keep).cloned().collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::RawRecord;
    use serde_json::json;

    fn compress(record: &RawRecord) -> StructuredCompression {
        StructuredCompression::from_snapshot(&MetricsSnapshot::derive(record))
    }

    #[test]
    fn test_classify_key_strips_per_bucket() {
        assert_eq!(classify_key("peTTM"), vec![(Bucket::Valuation, "pe".to_string())]);
        assert_eq!(
            classify_key("currentRatioQuarterly"),
            vec![(Bucket::Health, "currentRatio".to_string())]
        );
        assert_eq!(
            classify_key("assetTurnoverTTM"),
            vec![(Bucket::Efficiency, "assetTurnoverTTM".to_string())]
        );
    }

    #[test]
    fn test_keys_can_land_in_several_buckets() {
        // "eps" contains "ps", so EPS keys also count as valuation
        assert_eq!(
            classify_key("epsGrowthTTMYoy"),
            vec![
                (Bucket::Valuation, "epsGrowthYoy".to_string()),
                (Bucket::Profitability, "epsGrowthYoy".to_string()),
                (Bucket::Growth, "epsGrowthTTMYoy".to_string()),
            ]
        );

        let buckets: Vec<(Bucket, String)> = classify_key("totalDebt/totalEquityQuarterly");
        assert_eq!(
            buckets,
            vec![(Bucket::Health, "totalDebt/totalEquity".to_string())]
        );

        let buckets: Vec<Bucket> = classify_key("currentDividendYieldTTM").into_iter().map(|(b, _)| b).collect();
        assert_eq!(buckets, vec![Bucket::Dividend]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(classify_key("PE").is_empty());
        assert_eq!(classify_key("Beta"), vec![(Bucket::Performance, "Beta".to_string())]);
    }

    #[test]
    fn test_unmatched_keys_are_dropped() {
        let record = RawRecord::new("T")
            .with_metric("xyzUnrelated", 1.0)
            .with_metric("roaTTM", 0.11);
        let structured = compress(&record);

        let all_values: Vec<&BTreeMap<String, Value>> = [
            Bucket::Valuation,
            Bucket::Profitability,
            Bucket::Growth,
            Bucket::Health,
            Bucket::Performance,
            Bucket::Efficiency,
            Bucket::Dividend,
        ]
        .iter()
        .map(|&b| structured.bucket(b))
        .collect();
        assert!(all_values.iter().all(|bucket| !bucket.keys().any(|k| k.contains("xyz"))));
        assert_eq!(structured.profitability.get("roa"), Some(&json!(0.11)));
    }

    #[test]
    fn test_non_numeric_values_pass_through() {
        let record = RawRecord::from_value(json!({
            "symbol": "T",
            "metric": { "52WeekHighDate": "2024-07-15", "beta": null }
        }))
        .unwrap();
        let structured = compress(&record);
        assert_eq!(structured.performance.get("52WeekHighDate"), Some(&json!("2024-07-15")));
        assert_eq!(structured.performance.get("beta"), Some(&Value::Null));
    }

    #[test]
    fn test_series_are_truncated() {
        let record = RawRecord::new("T")
            .with_quarterly("eps", &[6.0, 5.0, 4.0, 3.0, 2.0, 1.0])
            .with_quarterly("netMargin", &[0.2])
            .with_annual("eps", &[9.0, 8.0, 7.0, 6.0]);
        let structured = compress(&record);

        let eps: Vec<f64> = structured.trends_quarterly["eps"].iter().map(|p| p.v).collect();
        assert_eq!(eps, vec![6.0, 5.0, 4.0, 3.0]);
        assert_eq!(structured.trends_quarterly["netMargin"].len(), 1);
        assert_eq!(structured.trends_annual["eps"].len(), 3);
    }

    #[test]
    fn test_trend_points_pass_through_unchanged() {
        let record = RawRecord::from_value(json!({
            "symbol": "T",
            "series": {
                "annual": {
                    "eps": [
                        { "period": "2023-12-31", "v": 6.1, "surprise": 0.04 },
                        { "period": "2022-12-31", "v": 5.9 }
                    ]
                }
            }
        }))
        .unwrap();
        let value = compress(&record).to_value().unwrap();
        assert_eq!(
            value["trends_annual"]["eps"],
            json!([
                { "period": "2023-12-31", "v": 6.1, "surprise": 0.04 },
                { "period": "2022-12-31", "v": 5.9 }
            ])
        );
    }

    #[test]
    fn test_serialized_layout() {
        let value = compress(&RawRecord::default()).to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "symbol": null,
                "valuation": {},
                "profitability": {},
                "growth": {},
                "health": {},
                "performance": {},
                "efficiency": {},
                "dividend": {},
                "trends_quarterly": {},
                "trends_annual": {}
            })
        );
    }
}
