use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Direction of projected population growth relative to the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthTrend {
    Increasing,
    Decreasing,
    Stable,
}

impl GrowthTrend {
    pub fn as_str(self) -> &'static str {
        match self {
            GrowthTrend::Increasing => "increasing",
            GrowthTrend::Decreasing => "decreasing",
            GrowthTrend::Stable => "stable",
        }
    }
}

impl fmt::Display for GrowthTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `None` when either growth rate is missing or unparseable.
pub fn classify_growth(current: Option<f64>, future: Option<f64>) -> Option<GrowthTrend> {
    let trend = match future?.partial_cmp(&current?)? {
        Ordering::Greater => GrowthTrend::Increasing,
        Ordering::Less => GrowthTrend::Decreasing,
        Ordering::Equal => GrowthTrend::Stable,
    };
    Some(trend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_growth_directions() {
        assert_eq!(classify_growth(Some(1.2), Some(1.8)), Some(GrowthTrend::Increasing));
        assert_eq!(classify_growth(Some(2.0), Some(-0.5)), Some(GrowthTrend::Decreasing));
        assert_eq!(classify_growth(Some(0.7), Some(0.7)), Some(GrowthTrend::Stable));
    }

    #[test]
    fn test_classify_growth_is_total_over_parsed_pairs() {
        let samples = [-3.0, -0.1, 0.0, 0.1, 2.5, 10.0];
        for current in samples {
            for future in samples {
                let trend = classify_growth(Some(current), Some(future));
                assert!(trend.is_some(), "no trend for ({current}, {future})");
            }
        }
    }

    #[test]
    fn test_classify_growth_skips_missing_sides() {
        assert_eq!(classify_growth(None, Some(1.0)), None);
        assert_eq!(classify_growth(Some(1.0), None), None);
        assert_eq!(classify_growth(Some(f64::NAN), Some(1.0)), None);
    }

    #[test]
    fn test_trend_labels() {
        assert_eq!(GrowthTrend::Increasing.to_string(), "increasing");
        assert_eq!(
            serde_json::to_string(&GrowthTrend::Stable).unwrap(),
            "\"stable\""
        );
    }
}
