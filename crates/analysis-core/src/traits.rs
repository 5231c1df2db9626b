use crate::{RawRecord, SummaryError};

/// Anything that can hand the summarization core a raw record for a symbol.
///
/// Retrieval failures must surface here, before a record reaches the core.
pub trait RecordSource {
    fn load(&self, symbol: &str) -> Result<RawRecord, SummaryError>;
}
