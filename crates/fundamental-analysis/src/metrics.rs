//! Fixed table of provider metric keys read by the categorized and text views.
//!
//! Keys outside this table are ignored by those views; the structured view
//! still buckets them by name.

/// A provider metric the engine knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    // Valuation
    PeTtm,
    ForwardPe,
    Pb,
    PbAnnual,
    PsTtm,
    PegTtm,
    EvEbitdaTtm,
    PfcfShareTtm,
    MarketCapitalization,
    EnterpriseValue,

    // Profitability
    EpsTtm,
    EpsGrowthTtmYoy,
    EpsGrowth3Y,
    EpsGrowth5Y,
    NetProfitMarginTtm,
    OperatingMarginTtm,
    GrossMarginTtm,
    PretaxMarginTtm,
    RoeTtm,
    RoaTtm,
    RoiTtm,
    NetMarginGrowth5Y,

    // Liquidity
    CurrentRatio,
    QuickRatio,
    CashPerShare,

    // Leverage
    DebtToEquity,
    LongTermDebtToEquity,
    DebtToAssets,
    InterestCoverageTtm,

    // Efficiency / cash flow
    AssetTurnoverTtm,
    InventoryTurnoverTtm,
    ReceivablesTurnoverTtm,
    CashFlowPerShareTtm,
    FocfCagr5Y,

    // Growth
    RevenueGrowthTtmYoy,
    RevenueGrowth3Y,
    RevenueGrowth5Y,
    RevenuePerShareTtm,

    // Dividend
    DividendYieldTtm,
    PayoutRatioTtm,
    DividendPerShareTtm,

    // Price performance
    WeekHigh52,
    WeekLow52,
    PriceReturn52Week,
    YtdPriceReturn,
    Beta,
    RelativeToSp500Week52,
    RelativeToSp500Ytd,
}

impl Metric {
    pub const ALL: [Metric; 48] = [
        Metric::PeTtm,
        Metric::ForwardPe,
        Metric::Pb,
        Metric::PbAnnual,
        Metric::PsTtm,
        Metric::PegTtm,
        Metric::EvEbitdaTtm,
        Metric::PfcfShareTtm,
        Metric::MarketCapitalization,
        Metric::EnterpriseValue,
        Metric::EpsTtm,
        Metric::EpsGrowthTtmYoy,
        Metric::EpsGrowth3Y,
        Metric::EpsGrowth5Y,
        Metric::NetProfitMarginTtm,
        Metric::OperatingMarginTtm,
        Metric::GrossMarginTtm,
        Metric::PretaxMarginTtm,
        Metric::RoeTtm,
        Metric::RoaTtm,
        Metric::RoiTtm,
        Metric::NetMarginGrowth5Y,
        Metric::CurrentRatio,
        Metric::QuickRatio,
        Metric::CashPerShare,
        Metric::DebtToEquity,
        Metric::LongTermDebtToEquity,
        Metric::DebtToAssets,
        Metric::InterestCoverageTtm,
        Metric::AssetTurnoverTtm,
        Metric::InventoryTurnoverTtm,
        Metric::ReceivablesTurnoverTtm,
        Metric::CashFlowPerShareTtm,
        Metric::FocfCagr5Y,
        Metric::RevenueGrowthTtmYoy,
        Metric::RevenueGrowth3Y,
        Metric::RevenueGrowth5Y,
        Metric::RevenuePerShareTtm,
        Metric::DividendYieldTtm,
        Metric::PayoutRatioTtm,
        Metric::DividendPerShareTtm,
        Metric::WeekHigh52,
        Metric::WeekLow52,
        Metric::PriceReturn52Week,
        Metric::YtdPriceReturn,
        Metric::Beta,
        Metric::RelativeToSp500Week52,
        Metric::RelativeToSp500Ytd,
    ];

    /// Provider key as it appears in the raw `metric` mapping
    pub fn key(&self) -> &'static str {
        match self {
            Metric::PeTtm => "peTTM",
            Metric::ForwardPe => "forwardPE",
            Metric::Pb => "pb",
            Metric::PbAnnual => "pbAnnual",
            Metric::PsTtm => "psTTM",
            Metric::PegTtm => "pegTTM",
            Metric::EvEbitdaTtm => "evEbitdaTTM",
            Metric::PfcfShareTtm => "pfcfShareTTM",
            Metric::MarketCapitalization => "marketCapitalization",
            Metric::EnterpriseValue => "enterpriseValue",
            Metric::EpsTtm => "epsTTM",
            Metric::EpsGrowthTtmYoy => "epsGrowthTTMYoy",
            Metric::EpsGrowth3Y => "epsGrowth3Y",
            Metric::EpsGrowth5Y => "epsGrowth5Y",
            Metric::NetProfitMarginTtm => "netProfitMarginTTM",
            Metric::OperatingMarginTtm => "operatingMarginTTM",
            Metric::GrossMarginTtm => "grossMarginTTM",
            Metric::PretaxMarginTtm => "pretaxMarginTTM",
            Metric::RoeTtm => "roeTTM",
            Metric::RoaTtm => "roaTTM",
            Metric::RoiTtm => "roiTTM",
            Metric::NetMarginGrowth5Y => "netMarginGrowth5Y",
            Metric::CurrentRatio => "currentRatioQuarterly",
            Metric::QuickRatio => "quickRatioQuarterly",
            Metric::CashPerShare => "cashPerSharePerShareQuarterly",
            Metric::DebtToEquity => "totalDebt/totalEquityQuarterly",
            Metric::LongTermDebtToEquity => "longTermDebt/equityQuarterly",
            Metric::DebtToAssets => "totalDebtToTotalAsset",
            Metric::InterestCoverageTtm => "netInterestCoverageTTM",
            Metric::AssetTurnoverTtm => "assetTurnoverTTM",
            Metric::InventoryTurnoverTtm => "inventoryTurnoverTTM",
            Metric::ReceivablesTurnoverTtm => "receivablesTurnoverTTM",
            Metric::CashFlowPerShareTtm => "cashFlowPerShareTTM",
            Metric::FocfCagr5Y => "focfCagr5Y",
            Metric::RevenueGrowthTtmYoy => "revenueGrowthTTMYoy",
            Metric::RevenueGrowth3Y => "revenueGrowth3Y",
            Metric::RevenueGrowth5Y => "revenueGrowth5Y",
            Metric::RevenuePerShareTtm => "revenuePerShareTTM",
            Metric::DividendYieldTtm => "currentDividendYieldTTM",
            Metric::PayoutRatioTtm => "payoutRatioTTM",
            Metric::DividendPerShareTtm => "dividendPerShareTTM",
            Metric::WeekHigh52 => "52WeekHigh",
            Metric::WeekLow52 => "52WeekLow",
            Metric::PriceReturn52Week => "52WeekPriceReturnDaily",
            Metric::YtdPriceReturn => "yearToDatePriceReturnDaily",
            Metric::Beta => "beta",
            Metric::RelativeToSp500Week52 => "priceRelativeToS&P50052Week",
            Metric::RelativeToSp500Ytd => "priceRelativeToS&P500Ytd",
        }
    }
}

/// Series names the quarterly and annual trend lines read
pub mod series {
    pub const EPS: &str = "eps";
    pub const NET_MARGIN: &str = "netMargin";
    pub const ROE_TTM: &str = "roeTTM";
}
