//! Number formatting for labels and table cells.

/// Insert `,` between groups of three integer digits.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Magnitude of a non-finite value as text.
fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() {
        Some("Infinity")
    } else {
        None
    }
}

/// Thousands-separated value with up to 12 significant digits.
///
/// `1500` is `1,500`, `1234.5` is `1,234.5`, `0.1 + 0.2` is `0.3`.
pub fn format_thousands(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        return if value < 0.0 { format!("-{text}") } else { text.to_string() };
    }

    let rounded: f64 = format!("{value:.11e}").parse().unwrap_or(value);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Whole dollars with thousands separators, sign before the symbol.
pub fn format_currency(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}${text}");
    }

    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_digits(&format!("{:.0}", rounded.abs())))
}

/// Ratio as a whole-number percentage.
pub fn format_percent(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{text}%");
    }

    let rounded = (value * 100.0).round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}%", group_digits(&format!("{:.0}", rounded.abs())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(100.0), "100");
        assert_eq!(format_thousands(1500.0), "1,500");
        assert_eq!(format_thousands(-30.0), "-30");
        assert_eq!(format_thousands(-1_234_567.0), "-1,234,567");
        assert_eq!(format_thousands(1234.5), "1,234.5");
        assert_eq!(format_thousands(0.1 + 0.2), "0.3");
        assert_eq!(format_thousands(f64::NAN), "NaN");
    }

    #[test]
    fn currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(1_500_000.0), "$1,500,000");
        assert_eq!(format_currency(2.5), "$3");
        assert_eq!(format_currency(-2.5), "-$3");
        assert_eq!(format_currency(-0.4), "$0");
        assert_eq!(format_currency(999.5), "$1,000");
        assert_eq!(format_currency(f64::NAN), "$NaN");
    }

    #[test]
    fn percent_whole_numbers() {
        assert_eq!(format_percent(0.42), "42%");
        assert_eq!(format_percent(1.0), "100%");
        assert_eq!(format_percent(-0.051), "-5%");
        assert_eq!(format_percent(-0.001), "0%");
        assert_eq!(format_percent(12.0), "1,200%");
    }
}
