//! Threshold rules for red flags, highlights and the aggregate health score.

use analysis_core::HealthLabel;
use serde::Serialize;

use crate::format::format_percent;
use crate::metrics::Metric;
use crate::snapshot::MetricTable;

/// Placeholder entry for an empty flag or highlight list
pub const NONE_IDENTIFIED: &str = "None identified";

/// Values substituted when a rule's metric is unknown.
///
/// Each rule has its own constant. The same metric deliberately gets
/// different defaults in different rules: unknown leverage never raises the
/// high-leverage flag but scores zero health points.
pub mod defaults {
    pub const FLAG_CURRENT_RATIO: f64 = 2.0;
    pub const FLAG_DEBT_TO_EQUITY: f64 = 0.0;
    pub const FLAG_NET_MARGIN: f64 = 0.0;
    pub const FLAG_EPS_GROWTH: f64 = 0.0;
    pub const FLAG_QUICK_RATIO: f64 = 2.0;

    pub const HIGHLIGHT_EPS_GROWTH: f64 = 0.0;
    pub const HIGHLIGHT_ROE: f64 = 0.0;
    pub const HIGHLIGHT_CURRENT_RATIO: f64 = 0.0;
    pub const HIGHLIGHT_REVENUE_GROWTH: f64 = 0.0;

    pub const HEALTH_NET_MARGIN: f64 = 0.0;
    pub const HEALTH_CURRENT_RATIO: f64 = 0.0;
    pub const HEALTH_DEBT_TO_EQUITY: f64 = 3.0;
    pub const HEALTH_EPS_GROWTH: f64 = -100.0;
    pub const HEALTH_ROE: f64 = 0.0;
}

struct SignalRule {
    metric: Metric,
    default: f64,
    trips: fn(f64) -> bool,
    message: fn(f64) -> String,
}

fn red_flag_rules() -> [SignalRule; 5] {
    [
        SignalRule {
            metric: Metric::CurrentRatio,
            default: defaults::FLAG_CURRENT_RATIO,
            trips: |v| v < 1.0,
            message: |_| "Liquidity concern: Current ratio below 1.0".to_string(),
        },
        SignalRule {
            metric: Metric::DebtToEquity,
            default: defaults::FLAG_DEBT_TO_EQUITY,
            trips: |v| v > 2.0,
            message: |_| "High leverage: Debt-to-equity above 2.0".to_string(),
        },
        SignalRule {
            metric: Metric::NetProfitMarginTtm,
            default: defaults::FLAG_NET_MARGIN,
            trips: |v| v < 0.0,
            message: |_| "Unprofitable: Negative net margin".to_string(),
        },
        SignalRule {
            metric: Metric::EpsGrowthTtmYoy,
            default: defaults::FLAG_EPS_GROWTH,
            trips: |v| v < -20.0,
            message: |v| format!("Significant EPS decline: {}", format_percent(Some(v), 1.0, 2)),
        },
        SignalRule {
            metric: Metric::QuickRatio,
            default: defaults::FLAG_QUICK_RATIO,
            trips: |v| v < 0.5,
            message: |_| "Very low quick ratio: May struggle with short-term obligations".to_string(),
        },
    ]
}

fn highlight_rules() -> [SignalRule; 4] {
    [
        SignalRule {
            metric: Metric::EpsGrowthTtmYoy,
            default: defaults::HIGHLIGHT_EPS_GROWTH,
            trips: |v| v > 20.0,
            message: |v| format!("Strong EPS growth: {} YoY", format_percent(Some(v), 1.0, 2)),
        },
        SignalRule {
            metric: Metric::RoeTtm,
            default: defaults::HIGHLIGHT_ROE,
            trips: |v| v > 0.20,
            message: |v| format!("Excellent ROE: {}", format_percent(Some(v), 100.0, 2)),
        },
        SignalRule {
            metric: Metric::CurrentRatio,
            default: defaults::HIGHLIGHT_CURRENT_RATIO,
            trips: |v| v > 2.0,
            message: |_| "Strong liquidity position".to_string(),
        },
        SignalRule {
            metric: Metric::RevenueGrowthTtmYoy,
            default: defaults::HIGHLIGHT_REVENUE_GROWTH,
            trips: |v| v > 15.0,
            message: |v| format!("High revenue growth: {}", format_percent(Some(v), 1.0, 2)),
        },
    ]
}

fn evaluate(rules: &[SignalRule], table: &MetricTable) -> Vec<String> {
    rules
        .iter()
        .filter_map(|rule| {
            let value = table.value_or(rule.metric, rule.default);
            (rule.trips)(value).then(|| (rule.message)(value))
        })
        .collect()
}

/// Red flags and highlights in rule order; empty when nothing tripped
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignalReport {
    pub red_flags: Vec<String>,
    pub highlights: Vec<String>,
}

pub fn detect_signals(table: &MetricTable) -> SignalReport {
    let report = SignalReport {
        red_flags: evaluate(&red_flag_rules(), table),
        highlights: evaluate(&highlight_rules(), table),
    };
    tracing::debug!(
        red_flags = report.red_flags.len(),
        highlights = report.highlights.len(),
        "signal rules evaluated"
    );
    report
}

/// Replace an empty list with the single "None identified" entry
pub fn or_none_identified(items: &[String]) -> Vec<String> {
    if items.is_empty() {
        vec![NONE_IDENTIFIED.to_string()]
    } else {
        items.to_vec()
    }
}

struct HealthLadder {
    metric: Metric,
    default: f64,
    two_points: fn(f64) -> bool,
    one_point: fn(f64) -> bool,
}

fn health_ladders() -> [HealthLadder; 5] {
    [
        // Profitability
        HealthLadder {
            metric: Metric::NetProfitMarginTtm,
            default: defaults::HEALTH_NET_MARGIN,
            two_points: |v| v > 0.10,
            one_point: |v| v > 0.0,
        },
        // Liquidity
        HealthLadder {
            metric: Metric::CurrentRatio,
            default: defaults::HEALTH_CURRENT_RATIO,
            two_points: |v| v > 1.5,
            one_point: |v| v > 1.0,
        },
        // Leverage
        HealthLadder {
            metric: Metric::DebtToEquity,
            default: defaults::HEALTH_DEBT_TO_EQUITY,
            two_points: |v| v < 1.0,
            one_point: |v| v < 2.0,
        },
        // Growth
        HealthLadder {
            metric: Metric::EpsGrowthTtmYoy,
            default: defaults::HEALTH_EPS_GROWTH,
            two_points: |v| v > 10.0,
            one_point: |v| v > 0.0,
        },
        // Returns
        HealthLadder {
            metric: Metric::RoeTtm,
            default: defaults::HEALTH_ROE,
            two_points: |v| v > 0.15,
            one_point: |v| v > 0.10,
        },
    ]
}

/// Additive 0-10 score and its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthScore {
    pub points: u8,
    pub label: HealthLabel,
}

pub fn score_health(table: &MetricTable) -> HealthScore {
    let points: u8 = health_ladders()
        .iter()
        .map(|ladder| {
            let value = table.value_or(ladder.metric, ladder.default);
            if (ladder.two_points)(value) {
                2
            } else if (ladder.one_point)(value) {
                1
            } else {
                0
            }
        })
        .sum();

    HealthScore {
        points,
        label: HealthLabel::from_score(points),
    }
}
