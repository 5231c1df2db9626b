use thiserror::Error;

/// Failures the summarization core can report.
///
/// A missing or null metric is never an error: lookups degrade to "N/A" or a
/// per-rule default instead.
#[derive(Error, Debug)]
pub enum SummaryError {
    /// The record could not be retrieved; raised by a `RecordSource`, never by the engine
    #[error("Record source error: {0}")]
    Source(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid detail level: {0} (expected brief, standard, detailed or structured)")]
    InvalidDetailLevel(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
