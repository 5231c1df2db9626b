use std::collections::BTreeMap;

use analysis_core::RawRecord;
use serde_json::Value;

/// Null-tolerant lookup over a record's flat metric mapping.
///
/// Absent keys, JSON nulls and non-numeric values all read as unknown.
#[derive(Debug, Clone, Copy)]
pub struct MetricAccessor<'a> {
    metric: &'a BTreeMap<String, Value>,
}

impl<'a> MetricAccessor<'a> {
    pub fn new(record: &'a RawRecord) -> Self {
        Self {
            metric: &record.metric,
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.metric.get(key).and_then(Value::as_f64)
    }

    pub fn get_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).unwrap_or(default)
    }
}
