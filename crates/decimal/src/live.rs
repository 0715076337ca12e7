//! Minor-unit entry: the digits in the field are read as an integer count of
//! the smallest unit (cents for two places), so typing `1`, `2`, `3` shows
//! `0,01`, `0,12`, `1,23`.

use crate::config::DecimalConfig;
use crate::config::MAX_DECIMAL_PLACES;
use crate::format::{pad_digits, render_digits};

/// How a minus sign in raw text is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignRule {
    /// Negative only if the text (after the prefix) starts with `-`. Typing.
    Leading,
    /// Negative if `-` appears anywhere. Pasting.
    Anywhere,
}

/// Digits and sign pulled out of raw field text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MinorEntry {
    pub digits: String,
    pub negative: bool,
}

impl MinorEntry {
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

/// Keep the digits of `raw` and decide its sign.
///
/// The configured prefix and suffix are stripped first, so affixes that
/// contain digits (` m2`) never leak into the value. The sign is dropped
/// when negatives are not allowed.
pub fn extract_entry(raw: &str, cfg: &DecimalConfig, rule: SignRule) -> MinorEntry {
    let body = cfg.strip_affixes(raw);
    let kept: String = body
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let negative = match rule {
        SignRule::Leading => kept.starts_with('-'),
        SignRule::Anywhere => kept.contains('-'),
    };

    MinorEntry {
        digits: kept.chars().filter(char::is_ascii_digit).collect(),
        negative: negative && cfg.allow_negative,
    }
}

/// Integer of minor units divided by `10^decimal_places`; `0.0` when empty.
///
/// ```
/// use decimal::live::{MinorEntry, minor_units_to_value};
///
/// let entry = MinorEntry { digits: "1234".into(), negative: true };
/// assert_eq!(minor_units_to_value(&entry, 2), -12.34);
/// ```
pub fn minor_units_to_value(entry: &MinorEntry, decimal_places: u32) -> f64 {
    let units = entry.digits.parse::<f64>().unwrap_or(0.0);
    let value = units / 10f64.powi(decimal_places.min(MAX_DECIMAL_PLACES) as i32);
    if entry.negative { -value } else { value }
}

/// Digits go straight to the display; no float round trip, so long entries
/// keep every digit.
fn render(entry: &MinorEntry, cfg: &DecimalConfig) -> String {
    let significant = entry.digits.trim_start_matches('0');
    render_digits(&pad_digits(significant.to_string(), cfg.places()), entry.negative, cfg)
}

/// Reformat the field after a keystroke.
///
/// ```
/// use decimal::{DecimalConfig, live::live_format};
///
/// let cfg = DecimalConfig::default().with_prefix("R$ ");
/// assert_eq!(live_format("R$ 0,012", &cfg), "R$ 0,12");
/// assert_eq!(live_format("R$ 0,1", &cfg), "R$ 0,01");
/// assert_eq!(live_format("", &cfg), "R$ 0,00");
/// ```
pub fn live_format(raw: &str, cfg: &DecimalConfig) -> String {
    render(&extract_entry(raw, cfg, SignRule::Leading), cfg)
}

/// Format pasted text as a whole new value.
pub fn paste_format(text: &str, cfg: &DecimalConfig) -> String {
    render(&extract_entry(text, cfg, SignRule::Anywhere), cfg)
}

/// Char index right after the last digit, i.e. just before the suffix.
pub fn caret_after_live_format(display: &str, cfg: &DecimalConfig) -> usize {
    let len = display.chars().count();
    if display.ends_with(cfg.suffix.as_str()) {
        len - cfg.suffix.chars().count()
    } else {
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_digits_shift_in_from_the_right() {
        let cfg = DecimalConfig::default().with_prefix("R$ ");
        let mut shown = String::new();
        let mut seen = Vec::new();
        for d in ["1", "2", "3", "4"] {
            shown.push_str(d);
            shown = live_format(&shown, &cfg);
            seen.push(shown.clone());
        }
        assert_eq!(seen, ["R$ 0,01", "R$ 0,12", "R$ 1,23", "R$ 12,34"]);
    }

    #[test]
    fn suffix_digits_do_not_leak() {
        let cfg = DecimalConfig::default().with_suffix(" m2");
        assert_eq!(live_format("0,015 m2", &cfg), "0,15 m2");
        assert_eq!(caret_after_live_format("0,15 m2", &cfg), 4);
    }

    #[test]
    fn leading_sign_only_when_typing() {
        let cfg = DecimalConfig::default().with_negative(true);
        assert_eq!(live_format("-1,23", &cfg), "-1,23");
        assert_eq!(live_format("1,-23", &cfg), "1,23");
        assert_eq!(paste_format("1,-23", &cfg), "-1,23");
    }

    #[test]
    fn long_entries_keep_growing() {
        let cfg = DecimalConfig::default().with_thousands(false);
        let typed = "9".repeat(320);
        let shown = live_format(&typed, &cfg);
        assert_eq!(shown, format!("{},99", "9".repeat(318)));
        assert_eq!(live_format(&format!("{shown}1"), &cfg).len(), shown.len() + 1);
    }

    #[test]
    fn sign_dropped_when_not_allowed() {
        let cfg = DecimalConfig::default();
        let entry = extract_entry("-500", &cfg, SignRule::Anywhere);
        assert!(!entry.negative);
        assert_eq!(paste_format("-500", &cfg), "5,00");
    }

    #[test]
    fn lone_minus_is_zero() {
        let cfg = DecimalConfig::default().with_negative(true);
        assert_eq!(live_format("-", &cfg), "0,00");
    }

    #[test]
    fn paste_extracts_digits_from_noise() {
        let cfg = DecimalConfig::default().with_prefix("R$ ");
        assert_eq!(paste_format("total: 1.234,56", &cfg), "R$ 1.234,56");
        assert_eq!(paste_format("nothing here", &cfg), "R$ 0,00");
    }

    #[test]
    fn zero_places_counts_whole_units() {
        let cfg = DecimalConfig::default().with_places(0);
        assert_eq!(live_format("1234", &cfg), "1.234");
    }

    #[test]
    fn caret_without_suffix_is_end() {
        let cfg = DecimalConfig::default().with_prefix("€ ");
        assert_eq!(caret_after_live_format("€ 1,00", &cfg), 6);
    }
}
