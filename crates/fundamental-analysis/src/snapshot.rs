//! Single derivation pass over a raw record.
//!
//! Every view (the categorized summary and all compression levels) is a
//! projection of one `MetricsSnapshot`, so the views cannot disagree about a
//! value, a trend or a threshold.

use std::collections::BTreeMap;

use analysis_core::RawRecord;

use crate::accessor::MetricAccessor;
use crate::metrics::{series, Metric};
use crate::signals::{detect_signals, score_health, HealthScore, SignalReport};
use crate::trend::trend_sequence;

/// Observations shown in a quarterly trend line
pub const QUARTERLY_TREND_PERIODS: usize = 4;
/// Observations shown in the annual EPS trend line
pub const ANNUAL_TREND_PERIODS: usize = 3;

/// Known metric values read once from the record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricTable {
    values: BTreeMap<Metric, f64>,
}

impl MetricTable {
    pub fn from_record(record: &RawRecord) -> Self {
        let accessor = MetricAccessor::new(record);
        let values = Metric::ALL
            .iter()
            .filter_map(|&metric| accessor.get(metric.key()).map(|v| (metric, v)))
            .collect();
        Self { values }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    pub fn value_or(&self, metric: Metric, default: f64) -> f64 {
        self.get(metric).unwrap_or(default)
    }

    pub fn known_count(&self) -> usize {
        self.values.len()
    }
}

/// Latest two quarterly EPS prints and their relative change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarterlyEpsChange {
    pub latest: f64,
    pub prior: f64,
    /// `(latest - prior) / |prior| * 100`, or 0 when `prior` is 0
    pub change_pct: f64,
}

impl QuarterlyEpsChange {
    fn from_record(record: &RawRecord) -> Option<Self> {
        let eps = record.series.quarterly.get(series::EPS)?;
        let (latest, prior) = match eps.as_slice() {
            [latest, prior, ..] => (latest.v, prior.v),
            _ => return None,
        };
        let change_pct = if prior != 0.0 {
            (latest - prior) / prior.abs() * 100.0
        } else {
            0.0
        };
        Some(Self {
            latest,
            prior,
            change_pct,
        })
    }
}

/// A labelled, chronologically ordered trend line
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub label: &'static str,
    pub sequence: String,
}

const QUARTERLY_TREND_SERIES: [(&str, &str); 3] = [
    ("EPS (4Q)", series::EPS),
    ("Net Margin", series::NET_MARGIN),
    ("ROE", series::ROE_TTM),
];

/// Normalized model of one record
#[derive(Debug, Clone)]
pub struct MetricsSnapshot<'a> {
    record: &'a RawRecord,
    pub table: MetricTable,
    pub quarterly_eps: Option<QuarterlyEpsChange>,
    /// Only series with at least four quarters appear
    pub quarterly_trends: Vec<TrendLine>,
    pub annual_eps_trend: Option<String>,
    pub signals: SignalReport,
    pub health: HealthScore,
}

impl<'a> MetricsSnapshot<'a> {
    pub fn derive(record: &'a RawRecord) -> Self {
        let table = MetricTable::from_record(record);

        let quarterly_trends = QUARTERLY_TREND_SERIES
            .iter()
            .filter_map(|&(label, name)| {
                trend_sequence(&record.series.quarterly, name, QUARTERLY_TREND_PERIODS)
                    .map(|sequence| TrendLine { label, sequence })
            })
            .collect();
        let annual_eps_trend =
            trend_sequence(&record.series.annual, series::EPS, ANNUAL_TREND_PERIODS);

        let signals = detect_signals(&table);
        let health = score_health(&table);

        tracing::debug!(
            symbol = record.symbol.as_deref().unwrap_or("?"),
            known_metrics = table.known_count(),
            raw_metrics = record.metric.len(),
            health_points = health.points,
            "derived metrics snapshot"
        );

        Self {
            record,
            quarterly_eps: QuarterlyEpsChange::from_record(record),
            table,
            quarterly_trends,
            annual_eps_trend,
            signals,
            health,
        }
    }

    pub fn record(&self) -> &'a RawRecord {
        self.record
    }

    pub fn symbol(&self) -> Option<&'a str> {
        self.record.symbol.as_deref()
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.table.get(metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ignores_unlisted_keys() {
        let record = RawRecord::new("T")
            .with_metric("peTTM", 18.0)
            .with_metric("xyzUnrelated", 1.0);
        let table = MetricTable::from_record(&record);
        assert_eq!(table.known_count(), 1);
        assert_eq!(table.get(Metric::PeTtm), Some(18.0));
        assert_eq!(table.value_or(Metric::Beta, 1.0), 1.0);
    }

    #[test]
    fn test_quarterly_eps_change() {
        let record = RawRecord::new("T").with_quarterly("eps", &[1.5, 1.2, 1.0]);
        let change = MetricsSnapshot::derive(&record).quarterly_eps.unwrap();
        assert_eq!(change.latest, 1.5);
        assert_eq!(change.prior, 1.2);
        assert!((change.change_pct - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_quarterly_eps_change_uses_absolute_prior() {
        let record = RawRecord::new("T").with_quarterly("eps", &[-0.5, -1.0]);
        let change = MetricsSnapshot::derive(&record).quarterly_eps.unwrap();
        assert!((change.change_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_quarterly_eps_change_guards_zero_prior() {
        let record = RawRecord::new("T").with_quarterly("eps", &[0.4, 0.0]);
        let change = MetricsSnapshot::derive(&record).quarterly_eps.unwrap();
        assert_eq!(change.change_pct, 0.0);
    }

    #[test]
    fn test_quarterly_eps_change_needs_two_points() {
        let record = RawRecord::new("T").with_quarterly("eps", &[0.4]);
        assert!(MetricsSnapshot::derive(&record).quarterly_eps.is_none());
    }

    #[test]
    fn test_trend_lines_skip_short_series() {
        let record = RawRecord::new("T")
            .with_quarterly("eps", &[4.0, 3.0, 2.0, 1.0])
            .with_quarterly("netMargin", &[0.2, 0.1])
            .with_quarterly("roeTTM", &[0.3, 0.25, 0.2, 0.15])
            .with_annual("eps", &[6.0, 5.0]);
        let snapshot = MetricsSnapshot::derive(&record);

        let labels: Vec<&str> = snapshot.quarterly_trends.iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["EPS (4Q)", "ROE"]);
        assert_eq!(snapshot.quarterly_trends[0].sequence, "1.00 → 2.00 → 3.00 → 4.00");
        assert!(snapshot.annual_eps_trend.is_none());
    }
}
