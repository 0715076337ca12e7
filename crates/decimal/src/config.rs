use serde::{Deserialize, Deserializer};

/// Largest supported `decimal_places`; larger requests are clamped.
pub const MAX_DECIMAL_PLACES: u32 = 100;

/// Display options for one decimal field.
///
/// Deserializes from TOML (or anything serde reads); absent keys take the
/// defaults below.
///
/// ```
/// let cfg: decimal::DecimalConfig = toml::from_str(r#"
///     decimal_places = 3
///     suffix = " kg"
/// "#).unwrap();
/// assert_eq!(cfg.decimal_places, 3);
/// assert!(cfg.show_thousands);
/// assert_eq!(cfg.decimal_separator, ',');
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecimalConfig {
    /// Digits after the decimal separator. Default 2, at most
    /// [`MAX_DECIMAL_PLACES`].
    #[serde(deserialize_with = "clamped_places")]
    pub decimal_places: u32,
    /// Group the integer part in threes. Default on.
    pub show_thousands: bool,
    /// Default off; when off every sign is dropped.
    pub allow_negative: bool,
    pub prefix: String,
    pub suffix: String,
    /// Default `,`.
    pub decimal_separator: char,
    /// Default `.`.
    pub group_separator: char,
}

impl Default for DecimalConfig {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            show_thousands: true,
            allow_negative: false,
            prefix: String::new(),
            suffix: String::new(),
            decimal_separator: ',',
            group_separator: '.',
        }
    }
}

impl DecimalConfig {
    pub fn with_places(mut self, places: u32) -> Self {
        self.decimal_places = places.min(MAX_DECIMAL_PLACES);
        self
    }

    /// `decimal_places` as used for rendering, clamped even when the field
    /// was set directly.
    pub(crate) fn places(&self) -> u32 {
        self.decimal_places.min(MAX_DECIMAL_PLACES)
    }

    pub fn with_thousands(mut self, on: bool) -> Self {
        self.show_thousands = on;
        self
    }

    pub fn with_negative(mut self, allow: bool) -> Self {
        self.allow_negative = allow;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Strip `prefix` from the start and `suffix` from the end when present.
    pub(crate) fn strip_affixes<'a>(&self, s: &'a str) -> &'a str {
        let s = if self.prefix.is_empty() {
            s
        } else {
            s.strip_prefix(self.prefix.as_str()).unwrap_or(s)
        };
        if self.suffix.is_empty() {
            s
        } else {
            s.strip_suffix(self.suffix.as_str()).unwrap_or(s)
        }
    }
}

fn clamped_places<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
    Ok(u32::deserialize(de)?.min(MAX_DECIMAL_PLACES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_fields() {
        let cfg = DecimalConfig::default()
            .with_places(0)
            .with_thousands(false)
            .with_negative(true)
            .with_prefix("US$ ")
            .with_suffix("!");
        assert_eq!(cfg.decimal_places, 0);
        assert!(!cfg.show_thousands);
        assert!(cfg.allow_negative);
        assert_eq!(cfg.prefix, "US$ ");
        assert_eq!(cfg.suffix, "!");
    }

    #[test]
    fn strip_affixes_is_anchored() {
        let cfg = DecimalConfig::default().with_prefix("R$").with_suffix("R$");
        assert_eq!(cfg.strip_affixes("R$ 1,00R$"), " 1,00");
        assert_eq!(cfg.strip_affixes("1,00"), "1,00");
    }

    #[test]
    fn places_are_clamped() {
        assert_eq!(DecimalConfig::default().with_places(5000).decimal_places, MAX_DECIMAL_PLACES);
        let cfg: DecimalConfig = toml::from_str("decimal_places = 4000000000").unwrap();
        assert_eq!(cfg.decimal_places, MAX_DECIMAL_PLACES);
        let direct = DecimalConfig { decimal_places: u32::MAX, ..DecimalConfig::default() };
        assert_eq!(direct.places(), MAX_DECIMAL_PLACES);
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg: DecimalConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, DecimalConfig::default());
    }
}
