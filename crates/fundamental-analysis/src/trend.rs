use analysis_core::{SeriesMap, TrendDirection};

/// Separator between chronologically ordered values in a trend line
pub const TREND_SEPARATOR: &str = " → ";

/// Classify a metric's direction from its growth rate.
///
/// Unknown inputs read as stable. Thresholds are exclusive: exactly 10% growth
/// is moderate, exactly -10% is a slight decline.
pub fn classify_trend(current: Option<f64>, growth_pct: Option<f64>) -> TrendDirection {
    let (Some(_), Some(growth)) = (current, growth_pct) else {
        return TrendDirection::Stable;
    };

    if growth > 10.0 {
        TrendDirection::StrongGrowth
    } else if growth > 5.0 {
        TrendDirection::ModerateGrowth
    } else if growth < -10.0 {
        TrendDirection::Declining
    } else if growth < 0.0 {
        TrendDirection::SlightDecline
    } else {
        TrendDirection::Stable
    }
}

/// Render the latest `periods` observations of a series oldest-first.
///
/// The provider delivers series most recent first. Returns `None` when fewer
/// than `periods` observations exist.
pub fn trend_sequence(series: &SeriesMap, metric_name: &str, periods: usize) -> Option<String> {
    let points = series.get(metric_name)?;
    if points.len() < periods {
        return None;
    }

    let rendered: Vec<String> = points[..periods]
        .iter()
        .rev()
        .map(|p| format!("{:.2}", p.v))
        .collect();
    Some(rendered.join(TREND_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::RawRecord;

    #[test]
    fn test_classify_trend_boundaries_are_exclusive() {
        let x = Some(0.2);
        assert_eq!(classify_trend(x, Some(10.0)), TrendDirection::ModerateGrowth);
        assert_eq!(classify_trend(x, Some(10.0001)), TrendDirection::StrongGrowth);
        assert_eq!(classify_trend(x, Some(5.0)), TrendDirection::Stable);
        assert_eq!(classify_trend(x, Some(5.5)), TrendDirection::ModerateGrowth);
        assert_eq!(classify_trend(x, Some(0.0)), TrendDirection::Stable);
        assert_eq!(classify_trend(x, Some(-0.1)), TrendDirection::SlightDecline);
        assert_eq!(classify_trend(x, Some(-10.0)), TrendDirection::SlightDecline);
        assert_eq!(classify_trend(x, Some(-10.5)), TrendDirection::Declining);
    }

    #[test]
    fn test_classify_trend_unknown_is_stable() {
        assert_eq!(classify_trend(None, Some(50.0)), TrendDirection::Stable);
        assert_eq!(classify_trend(Some(0.3), None), TrendDirection::Stable);
    }

    #[test]
    fn test_trend_sequence_needs_enough_points() {
        let record = RawRecord::new("T").with_quarterly("eps", &[1.5, 1.25, 1.0]);
        assert_eq!(trend_sequence(&record.series.quarterly, "eps", 4), None);
        assert_eq!(trend_sequence(&record.series.quarterly, "netMargin", 1), None);
    }

    #[test]
    fn test_trend_sequence_is_chronological() {
        let record = RawRecord::new("T").with_quarterly("eps", &[1.5, 1.25, 1.0, 0.75, 0.5]);
        assert_eq!(
            trend_sequence(&record.series.quarterly, "eps", 4).as_deref(),
            Some("0.75 → 1.00 → 1.25 → 1.50")
        );
    }
}
