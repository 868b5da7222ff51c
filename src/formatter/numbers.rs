use regex::Regex;
use std::sync::LazyLock;

use crate::property::FieldValue;

/// Sentinel substituted for anything that cannot be computed.
pub const NOT_AVAILABLE: &str = "N/A";

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.\-]").expect("static pattern"));

pub fn na() -> String {
    NOT_AVAILABLE.to_string()
}

/// Parsed numeric value of an optional raw field.
pub fn num(field: &Option<FieldValue>) -> Option<f64> {
    field.as_ref().and_then(FieldValue::as_f64)
}

/// Display text of an optional raw field, or the sentinel.
pub fn text(field: &Option<FieldValue>) -> String {
    field
        .as_ref()
        .and_then(FieldValue::as_text)
        .unwrap_or_else(na)
}

/// Values too large to scale have no fractional digits left to round.
fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// Rounds and groups thousands; returns the sign separately so callers can
/// place it before a currency symbol.
fn grouped(value: f64, decimals: usize) -> (bool, String) {
    let rounded = round_to(value, decimals);
    let fixed = format!("{:.*}", decimals, rounded.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }

    (rounded < 0.0, out)
}

/// `1234567.891, 2` → `"1,234,567.89"`.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => {
            let (negative, digits) = grouped(v, decimals);
            if negative {
                format!("-{digits}")
            } else {
                digits
            }
        }
        None => na(),
    }
}

/// `1234.5, 0` → `"$1,235"`; negatives render as `"-$1,235"`.
pub fn format_currency(value: Option<f64>, decimals: usize) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => {
            let (negative, digits) = grouped(v, decimals);
            if negative {
                format!("-${digits}")
            } else {
                format!("${digits}")
            }
        }
        None => na(),
    }
}

/// One-decimal percentage with a `%` suffix.
pub fn format_percent(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{}%", format_number(Some(v), 1)),
        None => na(),
    }
}

/// Percentile rank as a whole number: `"87.4%"` → `"87"`.
pub fn format_percentile(field: &Option<FieldValue>) -> String {
    let value = match field {
        Some(FieldValue::Number(n)) => Some(*n),
        Some(FieldValue::Text(s)) => NON_NUMERIC.replace_all(s, "").parse::<f64>().ok(),
        _ => None,
    };
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.0}", v.round() + 0.0),
        None => na(),
    }
}

/// `numerator / denominator` as a one-decimal percentage.
pub fn calculate_percentage(numerator: Option<f64>, denominator: Option<f64>) -> String {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => format_percent(Some(n / d * 100.0)),
        _ => na(),
    }
}

pub fn format_miles(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{} mi", format_number(Some(v), 1)),
        None => na(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(Some(1234567.891), 2), "1,234,567.89");
        assert_eq!(format_number(Some(999.0), 0), "999");
        assert_eq!(format_number(Some(1000.0), 0), "1,000");
        assert_eq!(format_number(Some(0.0), 2), "0.00");
    }

    #[test]
    fn test_format_number_rounding_carries() {
        assert_eq!(format_number(Some(999.96), 1), "1,000.0");
        assert_eq!(format_number(Some(2.5), 0), "3");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Some(25000.0), 0), "$25,000");
        assert_eq!(format_currency(Some(1234.567), 2), "$1,234.57");
        assert_eq!(format_currency(Some(-1500.0), 0), "-$1,500");
        assert_eq!(format_currency(Some(-0.2), 0), "$0");
    }

    #[test]
    fn test_huge_values_keep_their_digits() {
        let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.');

        let acres = format_number(Some(1e307), 2);
        assert!(is_digits(acres.as_str()), "{acres}");
        assert!(acres.ends_with(".00"));

        let share = format_percent(Some(1e308));
        assert!(share.ends_with(".0%"), "{share}");
        assert!(!share.contains("inf"));

        let rate = calculate_percentage(Some(1e306), Some(1.0));
        assert!(!rate.contains("inf"), "{rate}");
        assert!(!format_currency(Some(-1.7e308), 2).contains("inf"));
        assert!(!format_miles(Some(f64::MAX)).contains("inf"));
    }

    #[test]
    fn test_non_finite_values_become_sentinel() {
        assert_eq!(format_number(Some(f64::NAN), 0), "N/A");
        assert_eq!(format_currency(Some(f64::INFINITY), 0), "N/A");
        assert_eq!(format_percent(None), "N/A");
        assert_eq!(format_miles(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn test_format_percentile() {
        assert_eq!(format_percentile(&Some(FieldValue::Text("87.4%".into()))), "87");
        assert_eq!(format_percentile(&Some(FieldValue::Text("92nd".into()))), "92");
        assert_eq!(format_percentile(&Some(FieldValue::Number(55.5))), "56");
        assert_eq!(format_percentile(&Some(FieldValue::Text("abc".into()))), "N/A");
        assert_eq!(format_percentile(&Some(FieldValue::Text("-".into()))), "N/A");
        assert_eq!(format_percentile(&None), "N/A");
    }

    #[test]
    fn test_calculate_percentage() {
        assert_eq!(calculate_percentage(Some(450.0), Some(1200.0)), "37.5%");
        assert_eq!(calculate_percentage(Some(1.0), Some(3.0)), "33.3%");
        assert_eq!(calculate_percentage(Some(10.0), Some(0.0)), "N/A");
        assert_eq!(calculate_percentage(None, Some(10.0)), "N/A");
    }

    #[test]
    fn test_text_and_num_helpers() {
        assert_eq!(text(&None), "N/A");
        assert_eq!(text(&Some(FieldValue::Text(" AG-1 ".into()))), "AG-1");
        assert_eq!(num(&Some(FieldValue::Text("$5,000".into()))), Some(5000.0));
    }
}
