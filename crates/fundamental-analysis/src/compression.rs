//! Compression views: three text renderings of increasing size and the
//! structured mapping, selected by `DetailLevel`.

use analysis_core::{DetailLevel, SummaryError};
use serde_json::Value;

use crate::format::format_number;
use crate::metrics::Metric;
use crate::snapshot::MetricsSnapshot;
use crate::structured::StructuredCompression;

/// Symbol shown in text views when the record has none
pub const UNKNOWN_SYMBOL: &str = "Unknown";

const SECTION_SEPARATOR: &str = "\n\n";

/// One rendered compression view
#[derive(Debug, Clone, PartialEq)]
pub enum CompressedView {
    Text(String),
    Structured(StructuredCompression),
}

impl CompressedView {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CompressedView::Text(text) => Some(text),
            CompressedView::Structured(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&StructuredCompression> {
        match self {
            CompressedView::Text(_) => None,
            CompressedView::Structured(structured) => Some(structured),
        }
    }

    /// Text views become a JSON string, the structured view a mapping
    pub fn to_value(&self) -> Result<Value, SummaryError> {
        match self {
            CompressedView::Text(text) => Ok(Value::String(text.clone())),
            CompressedView::Structured(structured) => structured.to_value(),
        }
    }

    /// Text views verbatim, the structured view as JSON
    pub fn render(&self, pretty: bool) -> Result<String, SummaryError> {
        match self {
            CompressedView::Text(text) => Ok(text.clone()),
            CompressedView::Structured(structured) if pretty => structured.to_json_pretty(),
            CompressedView::Structured(structured) => Ok(serde_json::to_string(structured)?),
        }
    }
}

pub fn compress(snapshot: &MetricsSnapshot<'_>, level: DetailLevel) -> CompressedView {
    let view = match level {
        DetailLevel::Brief => CompressedView::Text(render_brief(snapshot)),
        DetailLevel::Standard => CompressedView::Text(render_standard(snapshot)),
        DetailLevel::Detailed => CompressedView::Text(render_detailed(snapshot)),
        DetailLevel::Structured => {
            CompressedView::Structured(StructuredCompression::from_snapshot(snapshot))
        }
    };
    tracing::debug!(level = level.as_str(), "rendered compression view");
    view
}

/// Field formatting shared by the text views
struct Fields<'s, 'a> {
    snapshot: &'s MetricsSnapshot<'a>,
}

impl Fields<'_, '_> {
    /// Two decimals, no unit
    fn num(&self, metric: Metric) -> String {
        format_number(self.snapshot.get(metric), 1.0, 2, "")
    }

    /// Fraction shown as a one-decimal percentage
    fn pct(&self, metric: Metric) -> String {
        format_number(self.snapshot.get(metric), 100.0, 1, "%")
    }

    fn symbol(&self) -> &str {
        self.snapshot.symbol().unwrap_or(UNKNOWN_SYMBOL)
    }
}

pub fn render_brief(snapshot: &MetricsSnapshot<'_>) -> String {
    let f = Fields { snapshot };
    format!(
        "{}: PE {} (PEG {}), EPS ${} ({} YoY), ROE {}, D/E {}, YTD {}",
        f.symbol(),
        f.num(Metric::PeTtm),
        f.num(Metric::PegTtm),
        f.num(Metric::EpsTtm),
        f.pct(Metric::EpsGrowthTtmYoy),
        f.pct(Metric::RoeTtm),
        f.num(Metric::DebtToEquity),
        f.pct(Metric::YtdPriceReturn),
    )
}

fn standard_sections(f: &Fields<'_, '_>) -> Vec<String> {
    vec![
        format!(
            "VALUATION: PE {} (Fwd {}), PEG {}, P/B {}, P/S {}, EV/EBITDA {}",
            f.num(Metric::PeTtm),
            f.num(Metric::ForwardPe),
            f.num(Metric::PegTtm),
            f.num(Metric::Pb),
            f.num(Metric::PsTtm),
            f.num(Metric::EvEbitdaTtm),
        ),
        format!(
            "PROFITABILITY: EPS ${} ({} YoY), ROE {}, ROA {}, Net Margin {}, Op Margin {}",
            f.num(Metric::EpsTtm),
            f.pct(Metric::EpsGrowthTtmYoy),
            f.pct(Metric::RoeTtm),
            f.pct(Metric::RoaTtm),
            f.pct(Metric::NetProfitMarginTtm),
            f.pct(Metric::OperatingMarginTtm),
        ),
        format!(
            "GROWTH: Revenue {} YoY, 3Y {}, 5Y {}, EPS 3Y {}, 5Y {}",
            f.pct(Metric::RevenueGrowthTtmYoy),
            f.pct(Metric::RevenueGrowth3Y),
            f.pct(Metric::RevenueGrowth5Y),
            f.pct(Metric::EpsGrowth3Y),
            f.pct(Metric::EpsGrowth5Y),
        ),
        format!(
            "HEALTH: D/E {}, Current {}, Quick {}, Cash/Share ${}",
            f.num(Metric::DebtToEquity),
            f.num(Metric::CurrentRatio),
            f.num(Metric::QuickRatio),
            f.num(Metric::CashPerShare),
        ),
        format!(
            "PERFORMANCE: YTD {}, 52W {}, vs S&P {}, Beta {}",
            f.pct(Metric::YtdPriceReturn),
            f.pct(Metric::PriceReturn52Week),
            f.pct(Metric::RelativeToSp500Week52),
            f.num(Metric::Beta),
        ),
    ]
}

pub fn render_standard(snapshot: &MetricsSnapshot<'_>) -> String {
    let f = Fields { snapshot };
    format!(
        "{} Financial Summary:{}{}",
        f.symbol(),
        SECTION_SEPARATOR,
        standard_sections(&f).join(SECTION_SEPARATOR)
    )
}

pub fn render_detailed(snapshot: &MetricsSnapshot<'_>) -> String {
    let f = Fields { snapshot };
    let mut sections = standard_sections(&f);

    sections.push(format!(
        "CASH FLOW: FCF/Share ${}, FCF Margin {} (5Y CAGR), P/FCF {}",
        f.num(Metric::CashFlowPerShareTtm),
        f.pct(Metric::FocfCagr5Y),
        f.num(Metric::PfcfShareTtm),
    ));
    sections.push(format!(
        "MARGINS: Gross {}, Operating {}, Pretax {}, Net {}",
        f.pct(Metric::GrossMarginTtm),
        f.pct(Metric::OperatingMarginTtm),
        f.pct(Metric::PretaxMarginTtm),
        f.pct(Metric::NetProfitMarginTtm),
    ));
    sections.push(format!(
        "EFFICIENCY: Asset Turnover {}, Inventory Turnover {}, Receivables Turnover {}",
        f.num(Metric::AssetTurnoverTtm),
        f.num(Metric::InventoryTurnoverTtm),
        f.num(Metric::ReceivablesTurnoverTtm),
    ));

    if snapshot.get(Metric::DividendYieldTtm).is_some_and(|y| y > 0.0) {
        sections.push(format!(
            "DIVIDEND: Yield {}, Payout Ratio {}, DPS ${}",
            format_number(snapshot.get(Metric::DividendYieldTtm), 100.0, 2, "%"),
            f.pct(Metric::PayoutRatioTtm),
            f.num(Metric::DividendPerShareTtm),
        ));
    }

    sections.push(format!(
        "PRICE RANGE: 52W High ${}, Low ${}, Current P/B {} vs Annual P/B {}",
        f.num(Metric::WeekHigh52),
        f.num(Metric::WeekLow52),
        f.num(Metric::Pb),
        f.num(Metric::PbAnnual),
    ));

    if !snapshot.quarterly_trends.is_empty() {
        let trends: Vec<String> = snapshot
            .quarterly_trends
            .iter()
            .map(|t| format!("{}: {}", t.label, t.sequence))
            .collect();
        sections.push(format!("QUARTERLY TRENDS: {}", trends.join(" | ")));
    }

    if let Some(annual) = &snapshot.annual_eps_trend {
        sections.push(format!("ANNUAL EPS (3Y): {annual}"));
    }

    format!(
        "{} Comprehensive Financial Analysis:{}{}",
        f.symbol(),
        SECTION_SEPARATOR,
        sections.join(SECTION_SEPARATOR)
    )
}
