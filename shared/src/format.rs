//! Display strings shared by every view.

pub const ABSENT: &str = "-";

/// `12,345 KRW`, rounded to whole won.
pub fn price(amount: Option<f64>) -> String {
    match amount {
        Some(amount) => format!("{} KRW", thousands(amount.round() as i64)),
        None => ABSENT.to_string(),
    }
}

/// Signed price gap, e.g. `+3,000 KRW`.
pub fn price_diff(diff: Option<f64>) -> String {
    match diff {
        Some(diff) if diff > 0.0 => format!("+{}", price(Some(diff))),
        other => price(other),
    }
}

pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Milliseconds as seconds with one decimal.
pub fn seconds(ms: Option<f64>) -> String {
    match ms {
        Some(ms) => format!("{:.1}s", ms / 1000.0),
        None => ABSENT.to_string(),
    }
}

pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn or_absent(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(ABSENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_group_thousands() {
        assert_eq!(price(Some(1234.0)), "1,234 KRW");
        assert_eq!(price(Some(999.4)), "999 KRW");
        assert_eq!(price(Some(1_000_000.0)), "1,000,000 KRW");
        assert_eq!(price(None), "-");
        assert_eq!(price_diff(Some(3000.0)), "+3,000 KRW");
        assert_eq!(price_diff(Some(-12500.0)), "-12,500 KRW");
    }

    #[test]
    fn timings_in_seconds() {
        assert_eq!(seconds(Some(1234.0)), "1.2s");
        assert_eq!(seconds(Some(60.0)), "0.1s");
        assert_eq!(seconds(None), "-");
    }

    #[test]
    fn percentages_keep_one_decimal() {
        assert_eq!(percent(50.0), "50.0%");
        assert_eq!(percent(33.333), "33.3%");
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(or_absent(Some("")), "-");
        assert_eq!(or_absent(None), "-");
        assert_eq!(or_absent(Some("torn")), "torn");
    }
}
