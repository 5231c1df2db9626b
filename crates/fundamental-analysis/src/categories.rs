//! Categorized summary: eight fixed groups of formatted or assessed fields plus
//! the signal lists and overall health.

use std::fmt;

use analysis_core::{HealthLabel, SummaryError, TrendDirection};
use serde::Serialize;
use serde_json::Value;

use crate::format::format_percent;
use crate::metrics::Metric;
use crate::signals::or_none_identified;
use crate::snapshot::MetricsSnapshot;
use crate::trend::classify_trend;

/// The categorized summary has no as-of date of its own
pub const SNAPSHOT_DATE: &str = "Latest Available";
/// Company name used when the record carries no symbol
pub const UNKNOWN_COMPANY: &str = "UNKNOWN";

/// Unknown current ratio reads as "tight"
pub const WORKING_CAPITAL_DEFAULT_CURRENT_RATIO: f64 = 0.0;
/// Unknown debt/equity reads as "low"
pub const LEVERAGE_DEFAULT_DEBT_TO_EQUITY: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Valuation,
    Profitability,
    Liquidity,
    Leverage,
    Efficiency,
    Performance,
    StockPerformance,
    QuarterlyTrend,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Valuation,
        Category::Profitability,
        Category::Liquidity,
        Category::Leverage,
        Category::Efficiency,
        Category::Performance,
        Category::StockPerformance,
        Category::QuarterlyTrend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Valuation => "valuation",
            Category::Profitability => "profitability",
            Category::Liquidity => "liquidity",
            Category::Leverage => "leverage",
            Category::Efficiency => "efficiency",
            Category::Performance => "performance",
            Category::StockPerformance => "stock_performance",
            Category::QuarterlyTrend => "quarterly_trend",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkingCapitalStatus {
    Healthy,
    Adequate,
    Tight,
}

impl WorkingCapitalStatus {
    pub fn from_current_ratio(ratio: f64) -> Self {
        if ratio > 1.5 {
            WorkingCapitalStatus::Healthy
        } else if ratio > 1.0 {
            WorkingCapitalStatus::Adequate
        } else {
            WorkingCapitalStatus::Tight
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeverageAssessment {
    High,
    Moderate,
    Low,
}

impl LeverageAssessment {
    pub fn from_debt_to_equity(ratio: f64) -> Self {
        if ratio > 2.0 {
            LeverageAssessment::High
        } else if ratio > 1.0 {
            LeverageAssessment::Moderate
        } else {
            LeverageAssessment::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationSummary {
    pub pe_ttm: Option<f64>,
    pub forward_pe: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub ps_ratio: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub ev_ebitda: Option<f64>,
    pub market_cap: Option<f64>,
    pub enterprise_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitabilitySummary {
    pub eps_ttm: Option<f64>,
    pub eps_growth_ttm_yoy: String,
    pub eps_growth_3y: String,
    pub net_margin_ttm: String,
    pub operating_margin_ttm: String,
    pub gross_margin_ttm: String,
    pub roe_ttm: String,
    pub roa_ttm: String,
    pub roic_ttm: String,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiquiditySummary {
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub cash_per_share: Option<f64>,
    pub working_capital_status: WorkingCapitalStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeverageSummary {
    pub debt_to_equity: Option<f64>,
    pub long_term_debt_to_equity: Option<f64>,
    pub debt_to_assets: Option<f64>,
    pub interest_coverage: Option<f64>,
    pub leverage_assessment: LeverageAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencySummary {
    pub asset_turnover_ttm: Option<f64>,
    pub inventory_turnover_ttm: Option<f64>,
    pub receivables_turnover_ttm: Option<f64>,
    pub cash_flow_per_share_ttm: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub revenue_growth_ttm_yoy: String,
    pub revenue_growth_3y: String,
    pub revenue_per_share_ttm: Option<f64>,
    pub dividend_yield: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockPerformanceSummary {
    #[serde(rename = "52_week_high")]
    pub week_52_high: Option<f64>,
    #[serde(rename = "52_week_low")]
    pub week_52_low: Option<f64>,
    #[serde(rename = "52_week_return")]
    pub week_52_return: String,
    pub ytd_return: String,
    pub beta: Option<f64>,
    pub vs_sp500_52week: String,
    pub vs_sp500_ytd: String,
}

/// Empty unless the quarterly EPS series has at least two points
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuarterlyTrendSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_quarter_eps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_quarter_eps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eps_qoq_change: Option<String>,
}

impl QuarterlyTrendSummary {
    pub fn is_empty(&self) -> bool {
        self.latest_quarter_eps.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorizedSummary {
    pub company: String,
    pub snapshot_date: String,
    pub valuation: ValuationSummary,
    pub profitability: ProfitabilitySummary,
    pub liquidity: LiquiditySummary,
    pub leverage: LeverageSummary,
    pub efficiency: EfficiencySummary,
    pub performance: PerformanceSummary,
    pub stock_performance: StockPerformanceSummary,
    pub quarterly_trend: QuarterlyTrendSummary,
    pub highlights: Vec<String>,
    pub red_flags: Vec<String>,
    pub overall_health: HealthLabel,
}

impl CategorizedSummary {
    pub fn from_snapshot(snapshot: &MetricsSnapshot<'_>) -> Self {
        let get = |metric: Metric| snapshot.get(metric);
        let pct = |metric: Metric, multiplier: f64| format_percent(get(metric), multiplier, 2);

        let valuation = ValuationSummary {
            pe_ttm: get(Metric::PeTtm),
            forward_pe: get(Metric::ForwardPe),
            pb_ratio: get(Metric::Pb),
            ps_ratio: get(Metric::PsTtm),
            peg_ratio: get(Metric::PegTtm),
            ev_ebitda: get(Metric::EvEbitdaTtm),
            market_cap: get(Metric::MarketCapitalization),
            enterprise_value: get(Metric::EnterpriseValue),
        };

        let profitability = ProfitabilitySummary {
            eps_ttm: get(Metric::EpsTtm),
            eps_growth_ttm_yoy: pct(Metric::EpsGrowthTtmYoy, 1.0),
            eps_growth_3y: pct(Metric::EpsGrowth3Y, 1.0),
            net_margin_ttm: pct(Metric::NetProfitMarginTtm, 100.0),
            operating_margin_ttm: pct(Metric::OperatingMarginTtm, 100.0),
            gross_margin_ttm: pct(Metric::GrossMarginTtm, 100.0),
            roe_ttm: pct(Metric::RoeTtm, 100.0),
            roa_ttm: pct(Metric::RoaTtm, 100.0),
            roic_ttm: pct(Metric::RoiTtm, 100.0),
            trend: classify_trend(get(Metric::NetProfitMarginTtm), get(Metric::NetMarginGrowth5Y)),
        };

        let liquidity = LiquiditySummary {
            current_ratio: get(Metric::CurrentRatio),
            quick_ratio: get(Metric::QuickRatio),
            cash_per_share: get(Metric::CashPerShare),
            working_capital_status: WorkingCapitalStatus::from_current_ratio(
                snapshot
                    .table
                    .value_or(Metric::CurrentRatio, WORKING_CAPITAL_DEFAULT_CURRENT_RATIO),
            ),
        };

        let leverage = LeverageSummary {
            debt_to_equity: get(Metric::DebtToEquity),
            long_term_debt_to_equity: get(Metric::LongTermDebtToEquity),
            debt_to_assets: get(Metric::DebtToAssets),
            interest_coverage: get(Metric::InterestCoverageTtm),
            leverage_assessment: LeverageAssessment::from_debt_to_equity(
                snapshot
                    .table
                    .value_or(Metric::DebtToEquity, LEVERAGE_DEFAULT_DEBT_TO_EQUITY),
            ),
        };

        let efficiency = EfficiencySummary {
            asset_turnover_ttm: get(Metric::AssetTurnoverTtm),
            inventory_turnover_ttm: get(Metric::InventoryTurnoverTtm),
            receivables_turnover_ttm: get(Metric::ReceivablesTurnoverTtm),
            cash_flow_per_share_ttm: get(Metric::CashFlowPerShareTtm),
        };

        let performance = PerformanceSummary {
            revenue_growth_ttm_yoy: pct(Metric::RevenueGrowthTtmYoy, 1.0),
            revenue_growth_3y: pct(Metric::RevenueGrowth3Y, 1.0),
            revenue_per_share_ttm: get(Metric::RevenuePerShareTtm),
            dividend_yield: pct(Metric::DividendYieldTtm, 100.0),
        };

        let stock_performance = StockPerformanceSummary {
            week_52_high: get(Metric::WeekHigh52),
            week_52_low: get(Metric::WeekLow52),
            week_52_return: pct(Metric::PriceReturn52Week, 1.0),
            ytd_return: pct(Metric::YtdPriceReturn, 1.0),
            beta: get(Metric::Beta),
            vs_sp500_52week: pct(Metric::RelativeToSp500Week52, 1.0),
            vs_sp500_ytd: pct(Metric::RelativeToSp500Ytd, 1.0),
        };

        let quarterly_trend = snapshot
            .quarterly_eps
            .map(|eps| QuarterlyTrendSummary {
                latest_quarter_eps: Some(eps.latest),
                prior_quarter_eps: Some(eps.prior),
                eps_qoq_change: Some(format_percent(Some(eps.change_pct), 1.0, 2)),
            })
            .unwrap_or_default();

        Self {
            company: snapshot
                .symbol()
                .map(str::to_uppercase)
                .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
            snapshot_date: SNAPSHOT_DATE.to_string(),
            valuation,
            profitability,
            liquidity,
            leverage,
            efficiency,
            performance,
            stock_performance,
            quarterly_trend,
            highlights: or_none_identified(&snapshot.signals.highlights),
            red_flags: or_none_identified(&snapshot.signals.red_flags),
            overall_health: snapshot.health.label,
        }
    }

    /// The whole summary as a JSON mapping
    pub fn to_value(&self) -> Result<Value, SummaryError> {
        Ok(serde_json::to_value(self)?)
    }

    /// One category's fields as a JSON mapping
    pub fn category_value(&self, category: Category) -> Result<Value, SummaryError> {
        let value = match category {
            Category::Valuation => serde_json::to_value(&self.valuation)?,
            Category::Profitability => serde_json::to_value(&self.profitability)?,
            Category::Liquidity => serde_json::to_value(&self.liquidity)?,
            Category::Leverage => serde_json::to_value(&self.leverage)?,
            Category::Efficiency => serde_json::to_value(&self.efficiency)?,
            Category::Performance => serde_json::to_value(&self.performance)?,
            Category::StockPerformance => serde_json::to_value(&self.stock_performance)?,
            Category::QuarterlyTrend => serde_json::to_value(&self.quarterly_trend)?,
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::RawRecord;
    use serde_json::json;

    fn summarize(record: &RawRecord) -> CategorizedSummary {
        CategorizedSummary::from_snapshot(&MetricsSnapshot::derive(record))
    }

    #[test]
    fn test_working_capital_ladder() {
        assert_eq!(WorkingCapitalStatus::from_current_ratio(1.6), WorkingCapitalStatus::Healthy);
        assert_eq!(WorkingCapitalStatus::from_current_ratio(1.5), WorkingCapitalStatus::Adequate);
        assert_eq!(WorkingCapitalStatus::from_current_ratio(1.0), WorkingCapitalStatus::Tight);
    }

    #[test]
    fn test_leverage_ladder() {
        assert_eq!(LeverageAssessment::from_debt_to_equity(2.1), LeverageAssessment::High);
        assert_eq!(LeverageAssessment::from_debt_to_equity(2.0), LeverageAssessment::Moderate);
        assert_eq!(LeverageAssessment::from_debt_to_equity(1.0), LeverageAssessment::Low);
    }

    #[test]
    fn test_unknown_liquidity_is_tight_and_unknown_leverage_is_low() {
        let summary = summarize(&RawRecord::new("t"));
        assert_eq!(summary.liquidity.working_capital_status, WorkingCapitalStatus::Tight);
        assert_eq!(summary.leverage.leverage_assessment, LeverageAssessment::Low);
    }

    #[test]
    fn test_multipliers_follow_storage_convention() {
        let record = RawRecord::new("msft")
            .with_metric("netProfitMarginTTM", 0.3612)
            .with_metric("epsGrowthTTMYoy", 12.5)
            .with_metric("currentDividendYieldTTM", 0.0072)
            .with_metric("yearToDatePriceReturnDaily", 8.25);
        let summary = summarize(&record);

        assert_eq!(summary.company, "MSFT");
        assert_eq!(summary.profitability.net_margin_ttm, "36.12%");
        assert_eq!(summary.profitability.eps_growth_ttm_yoy, "12.50%");
        assert_eq!(summary.performance.dividend_yield, "0.72%");
        assert_eq!(summary.stock_performance.ytd_return, "8.25%");
    }

    #[test]
    fn test_profitability_trend_uses_margin_growth() {
        let record = RawRecord::new("t")
            .with_metric("netProfitMarginTTM", 0.2)
            .with_metric("netMarginGrowth5Y", -12.0);
        assert_eq!(summarize(&record).profitability.trend, TrendDirection::Declining);
    }

    #[test]
    fn test_quarterly_trend_fields() {
        let record = RawRecord::new("t").with_quarterly("eps", &[1.5, 1.2, 1.1, 0.9, 0.8]);
        let summary = summarize(&record);
        assert!(!summary.quarterly_trend.is_empty());
        let value = summary.category_value(Category::QuarterlyTrend).unwrap();
        assert_eq!(
            value,
            json!({ "latest_quarter_eps": 1.5, "prior_quarter_eps": 1.2, "eps_qoq_change": "25.00%" })
        );
    }

    #[test]
    fn test_serialized_shape() {
        let summary = summarize(&RawRecord::new("t"));
        assert!(summary.quarterly_trend.is_empty());
        let value = summary.to_value().unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for key in [
            "company",
            "snapshot_date",
            "valuation",
            "profitability",
            "liquidity",
            "leverage",
            "efficiency",
            "performance",
            "stock_performance",
            "quarterly_trend",
            "highlights",
            "red_flags",
            "overall_health",
        ] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(keys.len(), 13);
        assert_eq!(value["snapshot_date"], json!("Latest Available"));
        assert_eq!(value["quarterly_trend"], json!({}));
        assert!(value["stock_performance"].get("52_week_high").is_some());
        assert_eq!(value["liquidity"]["working_capital_status"], json!("tight"));
    }

    #[test]
    fn test_missing_symbol_reads_unknown() {
        let record = RawRecord::default();
        assert_eq!(summarize(&record).company, "UNKNOWN");
    }
}
