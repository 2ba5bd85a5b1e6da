//! Number formatting for display.

/// Above this, f64 has no fractional digits worth showing and the integer
/// part no longer fits the `u64` path.
const WHOLE_NUMBER_THRESHOLD: f64 = 1e15;

/// Format a number with thousands separators and at most one decimal.
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    if !n.is_finite() {
        return "∞".to_string();
    }
    if n >= WHOLE_NUMBER_THRESHOLD {
        // `{:.0}` prints the exact decimal value of the float, any magnitude.
        return group_thousands(&format!("{:.0}", n.round()));
    }
    let tenths_total = (n * 10.0).round();
    let int_part = (tenths_total / 10.0).floor() as u64;
    let tenth = (tenths_total - int_part as f64 * 10.0) as u8;

    let result = group_thousands(&int_part.to_string());
    if tenth > 0 {
        format!("{}.{}", result, tenth)
    } else {
        result
    }
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Balance as shown to the player: rounded to a whole cookie.
pub fn format_balance(balance: f64) -> String {
    format_number(balance.round())
}

/// Rate rounded to one decimal.
pub fn format_rate(rate: f64) -> String {
    format_number((rate * 10.0).round() / 10.0)
}

/// Payback time as a short duration ("45s", "12m", "3.5h").
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{}s", seconds.round() as u64)
    } else if seconds < 3_600.0 {
        format!("{}m", (seconds / 60.0).round() as u64)
    } else {
        format!("{}h", format_number(((seconds / 3_600.0) * 10.0).round() / 10.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_basic() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(123.0), "123");
        assert_eq!(format_number(1234.0), "1,234");
        assert_eq!(format_number(1234567.0), "1,234,567");
    }

    #[test]
    fn format_number_with_fraction() {
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-3.5), "-3.5");
    }

    #[test]
    fn fraction_rounds_into_integer_part() {
        assert_eq!(format_number(1.97), "2");
        assert_eq!(format_number(999.96), "1,000");
    }

    #[test]
    fn balance_and_rate_rounding() {
        assert_eq!(format_balance(16.6), "17");
        assert_eq!(format_rate(0.30000000000000004), "0.3");
        assert_eq!(format_rate(1400.0), "1,400");
    }

    #[test]
    fn huge_numbers_keep_every_digit() {
        assert_eq!(format_number(1e20), "100,000,000,000,000,000,000");
        assert_eq!(format_number(-1e20), "-100,000,000,000,000,000,000");
        assert_eq!(format_number(1e15), "1,000,000,000,000,000");
    }

    #[test]
    fn late_game_price_is_not_saturated() {
        // Wizard Tower price with 180 owned, beyond u64::MAX.
        let price = (330_000_000.0 * 1.15_f64.powi(180)).round();
        assert!(price > u64::MAX as f64);
        let s = format_number(price);
        assert!(!s.contains('.'), "{s}");
        let digits: String = s.chars().filter(|c| *c != ',').collect();
        assert_eq!(digits.parse::<f64>().unwrap(), price);
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(45.2), "45s");
        assert_eq!(format_duration(150.0), "3m");
        assert_eq!(format_duration(5_400.0), "1.5h");
    }
}
