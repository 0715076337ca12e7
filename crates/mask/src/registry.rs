use crate::pattern::MaskPattern;
use crate::presets::PRESETS;
use std::collections::HashMap;

/// Named masks: the preset table plus anything registered at runtime.
///
/// Names are matched case-insensitively. A spec that names nothing known is
/// taken to be a literal pattern string. Preset aliases (`phone`, `date`)
/// are only reachable through [`MaskRegistry::resolve_alias`], so a raw
/// pattern never collides with one.
///
/// ```
/// use mask::MaskRegistry;
///
/// let mut reg = MaskRegistry::new();
/// reg.register("ramal", "0000");
///
/// assert_eq!(reg.resolve("cep").as_str(), "00000-000");
/// assert_eq!(reg.resolve("RAMAL").as_str(), "0000");
/// assert_eq!(reg.resolve("00-00").as_str(), "00-00");
/// assert_eq!(reg.resolve("time").as_str(), "time");
/// assert_eq!(reg.resolve_alias("time").map(|p| p.as_str()), Some("00:00"));
/// ```
#[derive(Clone, Debug)]
pub struct MaskRegistry {
    named: HashMap<String, MaskPattern>,
    aliases: HashMap<String, MaskPattern>,
}

impl Default for MaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskRegistry {
    /// Registry seeded with every preset under its name, and its alias in
    /// the alias table.
    pub fn new() -> Self {
        let mut named = HashMap::with_capacity(PRESETS.len());
        let mut aliases = HashMap::with_capacity(PRESETS.len());
        for (name, alias, pattern) in PRESETS {
            let pattern = MaskPattern::new(pattern);
            aliases.insert(alias.to_ascii_uppercase(), pattern.clone());
            named.insert(name.to_ascii_uppercase(), pattern);
        }
        Self { named, aliases }
    }

    /// Registry with no names at all; every spec is a raw pattern.
    pub fn empty() -> Self {
        Self {
            named: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Add or replace a named mask. Returns the pattern it displaced.
    pub fn register(&mut self, name: &str, pattern: &str) -> Option<MaskPattern> {
        let previous = self
            .named
            .insert(name.to_ascii_uppercase(), MaskPattern::new(pattern));
        if previous.is_some() {
            log::debug!(target: "mask", "replaced named mask {name:?} with {pattern:?}");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&MaskPattern> {
        self.named.get(&name.to_ascii_uppercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Preset pattern for an alias such as `postal_code`.
    pub fn resolve_alias(&self, alias: &str) -> Option<&MaskPattern> {
        self.aliases.get(&alias.to_ascii_uppercase())
    }

    pub fn resolve(&self, spec: &str) -> MaskPattern {
        match self.get(spec) {
            Some(p) => p.clone(),
            None => {
                log::trace!(target: "mask", "{spec:?} is not a named mask, using it as a pattern");
                MaskPattern::new(spec)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_by_name_and_alias() {
        let reg = MaskRegistry::new();
        assert_eq!(reg.resolve("PLACA_MERCOSUL").as_str(), "AAA-0A00");
        assert_eq!(reg.resolve("validade_cartao").as_str(), "00/00");
        let alias = reg.resolve_alias("plate_mercosul").map(|p| p.as_str().to_string());
        assert_eq!(alias.as_deref(), Some("AAA-0A00"));
    }

    #[test]
    fn aliases_do_not_capture_raw_patterns() {
        let reg = MaskRegistry::new();
        assert_eq!(reg.resolve("card").as_str(), "card");
        assert_eq!(reg.resolve("date").as_str(), "date");
        assert!(!reg.contains("phone"));
        assert!(reg.resolve_alias("CPF").is_none());
    }

    #[test]
    fn register_overrides_preset() {
        let mut reg = MaskRegistry::new();
        let old = reg.register("cep", "00.000-000");
        assert_eq!(old.map(|p| p.as_str().to_string()).as_deref(), Some("00000-000"));
        assert_eq!(reg.resolve("CEP").as_str(), "00.000-000");
        // alias untouched
        let alias = reg.resolve_alias("postal_code").map(|p| p.as_str().to_string());
        assert_eq!(alias.as_deref(), Some("00000-000"));
    }

    #[test]
    fn empty_registry_treats_everything_as_pattern() {
        let reg = MaskRegistry::empty();
        assert!(reg.is_empty());
        assert_eq!(reg.resolve("CPF").as_str(), "CPF");
    }
}
