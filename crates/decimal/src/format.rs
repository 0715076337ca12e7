use crate::config::DecimalConfig;

/// Render `value` for display.
///
/// The magnitude is rounded half away from zero to `decimal_places`. A minus
/// sign is shown only when negatives are allowed and the rounded magnitude is
/// not zero.
///
/// ```
/// use decimal::{DecimalConfig, format};
///
/// let cfg = DecimalConfig::default();
/// assert_eq!(format(0.0, &cfg), "0,00");
/// assert_eq!(format(1234567.891, &cfg), "1.234.567,89");
/// assert_eq!(format(-5.0, &cfg), "5,00");
/// assert_eq!(format(-5.0, &cfg.clone().with_negative(true)), "-5,00");
/// assert_eq!(format(f64::NAN, &cfg), "");
/// ```
pub fn format(value: f64, cfg: &DecimalConfig) -> String {
    if value.is_nan() {
        return String::new();
    }
    let digits = rounded_digits(value.abs(), cfg.places());
    render_digits(&digits, value < 0.0, cfg)
}

/// Lay out an already rounded digit string (`places + 1` digits at least,
/// the last `places` of them fractional) with sign, grouping and affixes.
pub(crate) fn render_digits(digits: &str, negative: bool, cfg: &DecimalConfig) -> String {
    let places = cfg.places() as usize;
    let (int_digits, frac_digits) = digits.split_at(digits.len() - places);

    let mut out = String::with_capacity(cfg.prefix.len() + digits.len() + cfg.suffix.len() + 8);
    out.push_str(&cfg.prefix);

    let is_zero = digits.bytes().all(|b| b == b'0');
    if negative && cfg.allow_negative && !is_zero {
        out.push('-');
    }

    if cfg.show_thousands {
        push_grouped(&mut out, int_digits, cfg.group_separator);
    } else {
        out.push_str(int_digits);
    }

    if places > 0 {
        out.push(cfg.decimal_separator);
        out.push_str(frac_digits);
    }

    out.push_str(&cfg.suffix);
    out
}

/// Read a displayed value back. Never fails: anything unreadable is `0.0`.
///
/// ```
/// use decimal::{DecimalConfig, parse};
///
/// let cfg = DecimalConfig::default().with_suffix(" kg").with_negative(true);
/// assert_eq!(parse("-1.250,5 kg", &cfg), -1250.5);
/// assert_eq!(parse("", &cfg), 0.0);
/// assert_eq!(parse("abc", &cfg), 0.0);
/// ```
pub fn parse(display: &str, cfg: &DecimalConfig) -> f64 {
    if display.is_empty() {
        return 0.0;
    }

    let body = cfg.strip_affixes(display).trim();
    let (negative, body) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };

    let mut normalized = String::with_capacity(body.len());
    let mut seen_decimal = false;
    for c in body.chars() {
        if c == cfg.group_separator {
            continue;
        }
        if c == cfg.decimal_separator && !seen_decimal {
            seen_decimal = true;
            normalized.push('.');
        } else {
            normalized.push(c);
        }
    }

    let magnitude = parse_float_prefix(&normalized).unwrap_or(0.0);
    if negative && cfg.allow_negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Parse a value in canonical form (`1234.56`), as a server would render it.
///
/// A single `,` is accepted in place of the decimal point. Returns `None`
/// when no number can be read.
///
/// ```
/// use decimal::parse_canonical;
///
/// assert_eq!(parse_canonical("1234.56"), Some(1234.56));
/// assert_eq!(parse_canonical("  12,5 "), Some(12.5));
/// assert_eq!(parse_canonical("n/a"), None);
/// ```
pub fn parse_canonical(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let normalized = s.replacen(',', ".", 1);
    parse_float_prefix(&normalized)
}

/// Digits of `magnitude * 10^places`, rounded, with at least `places + 1`
/// digits so the integer part is never empty.
fn rounded_digits(magnitude: f64, places: u32) -> String {
    let scaled = (magnitude * 10f64.powi(places as i32)).round();
    let digits = if scaled.is_finite() {
        format!("{scaled:.0}")
    } else if magnitude.is_finite() {
        // Scaling overflowed; let the float formatter do the rounding.
        format!("{:.*}", places as usize, magnitude).replace('.', "")
    } else {
        "0".to_string()
    };
    pad_digits(digits, places)
}

/// Left-pad with zeros to `places + 1` digits.
pub(crate) fn pad_digits(mut digits: String, places: u32) -> String {
    let min_len = places as usize + 1;
    if digits.len() < min_len {
        digits.insert_str(0, &"0".repeat(min_len - digits.len()));
    }
    digits
}

fn push_grouped(out: &mut String, int_digits: &str, sep: char) {
    let len = int_digits.len();
    for (i, c) in int_digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
}

/// Longest leading `[+-]digits[.digits][e[+-]digits]` of `s`, like a lenient
/// float reader. Leading whitespace is skipped.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if mantissa_digits > 0 || frac_end > frac_start {
            mantissa_digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_DECIMAL_PLACES;

    fn cfg() -> DecimalConfig {
        DecimalConfig::default()
    }

    #[test]
    fn zero_with_default_places() {
        assert_eq!(format(0.0, &cfg()), "0,00");
    }

    #[test]
    fn grouping_boundaries() {
        assert_eq!(format(999.0, &cfg()), "999,00");
        assert_eq!(format(1000.0, &cfg()), "1.000,00");
        assert_eq!(format(123456.0, &cfg()), "123.456,00");
        assert_eq!(format(1234567.0, &cfg().with_thousands(false)), "1234567,00");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format(0.125, &cfg()), "0,13");
        assert_eq!(format(2.5, &cfg().with_places(0)), "3");
        assert_eq!(
            format(-2.5, &cfg().with_places(0).with_negative(true)),
            "-3"
        );
    }

    #[test]
    fn zero_places_has_no_separator() {
        assert_eq!(format(1234.4, &cfg().with_places(0)), "1.234");
    }

    #[test]
    fn small_values_are_zero_padded() {
        assert_eq!(format(0.01, &cfg()), "0,01");
        assert_eq!(format(0.005, &cfg().with_places(3)), "0,005");
    }

    #[test]
    fn negative_zero_after_rounding_drops_sign() {
        let neg = cfg().with_negative(true);
        assert_eq!(format(-0.001, &neg), "0,00");
        assert_eq!(format(-0.0, &neg), "0,00");
    }

    #[test]
    fn sign_goes_between_prefix_and_digits() {
        let neg = cfg().with_negative(true).with_prefix("R$ ").with_suffix(" BRL");
        assert_eq!(format(-1234.5, &neg), "R$ -1.234,50 BRL");
        assert_eq!(parse("R$ -1.234,50 BRL", &neg), -1234.5);
    }

    #[test]
    fn parse_ignores_sign_when_not_allowed() {
        assert_eq!(parse("-3,50", &cfg()), 3.5);
    }

    #[test]
    fn parse_reads_longest_numeric_prefix() {
        assert_eq!(parse("12,5abc", &cfg()), 12.5);
        assert_eq!(parse(",5", &cfg()), 0.5);
        assert_eq!(parse("-", &cfg().with_negative(true)), 0.0);
    }

    #[test]
    fn custom_separators() {
        let us = DecimalConfig {
            decimal_separator: '.',
            group_separator: ',',
            ..DecimalConfig::default()
        };
        assert_eq!(format(1234567.5, &us), "1,234,567.50");
        assert_eq!(parse("1,234,567.50", &us), 1234567.5);
    }

    #[test]
    fn round_trip_within_precision() {
        let cfgs = [
            cfg(),
            cfg().with_places(0),
            cfg().with_places(4).with_negative(true).with_prefix("$"),
            cfg().with_thousands(false).with_suffix(" %"),
        ];
        let values: [f64; 8] = [0.0, 0.01, 1.5, 999.99, 1000.0, 123456.789, -42.42, 9.999];
        for c in &cfgs {
            let tolerance = 10f64.powi(-(c.decimal_places as i32));
            for v in values {
                let expected = if c.allow_negative { v } else { v.abs() };
                let back = parse(&format(v, c), c);
                assert!(
                    (back - expected).abs() <= tolerance,
                    "{v} -> {} -> {back} ({c:?})",
                    format(v, c)
                );
            }
        }
    }

    #[test]
    fn huge_values_keep_their_digits() {
        for v in [1e307, f64::MAX] {
            let shown = format(v, &cfg());
            assert!(shown.ends_with(",00"), "{shown}");
            let back = parse(&shown, &cfg());
            assert!((back / v - 1.0).abs() < 1e-12, "{v} -> {shown}");
        }
        assert_eq!(format(f64::INFINITY, &cfg()), "0,00");
    }

    #[test]
    fn places_are_capped() {
        let shown = format(1.0, &cfg().with_places(50_000_000));
        assert_eq!(shown.len(), 2 + MAX_DECIMAL_PLACES as usize);
        assert!(shown.starts_with("1,0"));
    }

    #[test]
    fn float_prefix_edge_cases() {
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("-.25"), Some(-0.25));
        assert_eq!(parse_float_prefix(""), None);
    }
}
