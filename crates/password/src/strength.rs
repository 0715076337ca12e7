use serde::Deserialize;

/// Symbols that satisfy the special-character requirement.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

const POINTS_PER_REQUIREMENT: u8 = 20;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Counted in characters. Default 8.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Requirement {
    Length,
    Uppercase,
    Lowercase,
    Number,
    Special,
}

impl Requirement {
    pub const ALL: [Requirement; 5] = [
        Self::Length,
        Self::Uppercase,
        Self::Lowercase,
        Self::Number,
        Self::Special,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Number => "number",
            Self::Special => "special",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Requirements {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub special: bool,
}

impl Requirements {
    pub fn check(password: &str, policy: &PasswordPolicy) -> Self {
        Self {
            length: password.chars().count() >= policy.min_length,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
        }
    }

    pub fn is_met(&self, req: Requirement) -> bool {
        match req {
            Requirement::Length => self.length,
            Requirement::Uppercase => self.uppercase,
            Requirement::Lowercase => self.lowercase,
            Requirement::Number => self.number,
            Requirement::Special => self.special,
        }
    }

    pub fn met_count(&self) -> usize {
        Requirement::ALL.iter().filter(|r| self.is_met(**r)).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Medium,
    Strong,
}

impl StrengthLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Strong,
            60..=79 => Self::Medium,
            40..=59 => Self::Weak,
            _ => Self::VeryWeak,
        }
    }

    /// Text shown next to the meter.
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryWeak => "Muito fraca",
            Self::Weak => "Fraca",
            Self::Medium => "Media",
            Self::Strong => "Forte",
        }
    }

    /// Bootstrap contextual color name (`bg-*` / `text-*`).
    pub fn tone(self) -> &'static str {
        match self {
            Self::VeryWeak => "danger",
            Self::Weak => "warning",
            Self::Medium => "info",
            Self::Strong => "success",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strength {
    /// 0 to 100, in steps of 20.
    pub score: u8,
    pub requirements: Requirements,
    pub level: StrengthLevel,
}

impl Strength {
    pub fn is_strong(&self) -> bool {
        self.score >= 80
    }

    pub fn is_medium(&self) -> bool {
        self.score >= 60
    }

    pub fn is_weak(&self) -> bool {
        self.score < 60
    }
}

pub fn evaluate(password: &str, policy: &PasswordPolicy) -> Strength {
    let requirements = Requirements::check(password, policy);
    let score = requirements.met_count() as u8 * POINTS_PER_REQUIREMENT;
    Strength {
        score,
        requirements,
        level: StrengthLevel::from_score(score),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchState {
    /// Nothing typed in the confirmation field yet.
    Empty,
    Matches,
    Differs,
}

impl MatchState {
    /// `true` unless the fields are known to differ.
    pub fn is_acceptable(self) -> bool {
        !matches!(self, Self::Differs)
    }
}

pub fn confirmation(password: &str, confirm: &str) -> MatchState {
    if confirm.is_empty() {
        MatchState::Empty
    } else if password == confirm {
        MatchState::Matches
    } else {
        MatchState::Differs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_marks() {
        let s = evaluate("Abc123!@", &PasswordPolicy::default());
        assert_eq!(s.score, 100);
        assert_eq!(s.level, StrengthLevel::Strong);
        assert!(s.is_strong() && s.is_medium() && !s.is_weak());
    }

    #[test]
    fn lowercase_only() {
        let s = evaluate("abc", &PasswordPolicy::default());
        assert_eq!(s.score, 20);
        assert_eq!(s.level, StrengthLevel::VeryWeak);
        assert_eq!(s.level.label(), "Muito fraca");
        assert_eq!(s.level.tone(), "danger");
        assert!(s.requirements.lowercase);
        assert!(!s.requirements.length);
    }

    #[test]
    fn thresholds() {
        assert_eq!(StrengthLevel::from_score(0), StrengthLevel::VeryWeak);
        assert_eq!(StrengthLevel::from_score(20), StrengthLevel::VeryWeak);
        assert_eq!(StrengthLevel::from_score(40), StrengthLevel::Weak);
        assert_eq!(StrengthLevel::from_score(60), StrengthLevel::Medium);
        assert_eq!(StrengthLevel::from_score(80), StrengthLevel::Strong);
        assert_eq!(StrengthLevel::from_score(100), StrengthLevel::Strong);
    }

    #[test]
    fn medium_password() {
        // length, lower, digit
        let s = evaluate("abcdefg1", &PasswordPolicy::default());
        assert_eq!(s.score, 60);
        assert_eq!(s.level.tone(), "info");
        assert!(s.is_medium() && !s.is_strong());
    }

    #[test]
    fn length_counts_characters() {
        let policy = PasswordPolicy { min_length: 4 };
        let r = Requirements::check("ção!", &policy);
        assert!(r.length);
        assert!(r.special);
        // only ASCII letters count for the case requirements
        assert!(r.lowercase);
        assert!(!Requirements::check("ÇÃ", &policy).uppercase);
    }

    #[test]
    fn unlisted_symbols_are_not_special() {
        let r = Requirements::check("a-b_c+d", &PasswordPolicy::default());
        assert!(!r.special);
    }

    #[test]
    fn empty_password_scores_zero() {
        let s = evaluate("", &PasswordPolicy::default());
        assert_eq!(s.score, 0);
        assert_eq!(s.requirements.met_count(), 0);
    }

    #[test]
    fn confirmation_states() {
        assert_eq!(confirmation("secret", ""), MatchState::Empty);
        assert_eq!(confirmation("secret", "secret"), MatchState::Matches);
        assert_eq!(confirmation("secret", "secreT"), MatchState::Differs);
        assert!(MatchState::Empty.is_acceptable());
        assert!(!MatchState::Differs.is_acceptable());
    }

    #[test]
    fn policy_from_toml() {
        let p: PasswordPolicy = toml::from_str("min_length = 12").unwrap();
        assert_eq!(p.min_length, 12);
        let p: PasswordPolicy = toml::from_str("").unwrap();
        assert_eq!(p, PasswordPolicy::default());
    }
}
