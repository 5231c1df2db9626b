//! Fundamentals summarization engine.
//!
//! Turns a provider-shaped metrics record into compact summaries: a
//! categorized mapping with red flags, highlights and an overall health
//! label, and four compression views (brief, standard, detailed, structured).
//! Every entry point is a pure function of its input record.

pub mod accessor;
pub mod categories;
pub mod compression;
pub mod format;
pub mod metrics;
pub mod signals;
pub mod snapshot;
pub mod structured;
pub mod trend;


use analysis_core::{DetailLevel, RawRecord, SummaryError};

pub use accessor::MetricAccessor;
pub use categories::{CategorizedSummary, Category, LeverageAssessment, WorkingCapitalStatus};
pub use compression::CompressedView;
pub use format::{format_number, format_percent, NOT_AVAILABLE};
pub use metrics::Metric;
pub use signals::{score_health, HealthScore, SignalReport, NONE_IDENTIFIED};
pub use snapshot::{MetricTable, MetricsSnapshot};
pub use structured::{Bucket, StructuredCompression};
pub use trend::{classify_trend, trend_sequence};

pub struct FundamentalSummarizer;

impl FundamentalSummarizer {
    pub fn new() -> Self {
        Self
    }

    /// Derive the normalized model every view projects from
    pub fn snapshot<'a>(&self, record: &'a RawRecord) -> MetricsSnapshot<'a> {
        MetricsSnapshot::derive(record)
    }

    pub fn summarize(&self, record: &RawRecord) -> CategorizedSummary {
        CategorizedSummary::from_snapshot(&self.snapshot(record))
    }

    pub fn compress(&self, record: &RawRecord, level: DetailLevel) -> CompressedView {
        compression::compress(&self.snapshot(record), level)
    }

    /// Like `compress`, with the level given as text.
    ///
    /// Unrecognized levels fail with `InvalidDetailLevel` rather than falling
    /// back to the standard view.
    pub fn compress_str(&self, record: &RawRecord, level: &str) -> Result<CompressedView, SummaryError> {
        let level: DetailLevel = level.parse()?;
        Ok(self.compress(record, level))
    }
}

impl Default for FundamentalSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Categorized summary of one record
pub fn summarize(record: &RawRecord) -> CategorizedSummary {
    FundamentalSummarizer::new().summarize(record)
}

/// One compression view of one record
pub fn compress(record: &RawRecord, level: DetailLevel) -> CompressedView {
    FundamentalSummarizer::new().compress(record, level)
}
