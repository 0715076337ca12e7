use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// What a slot accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotClass {
    /// `0`
    Digit,
    /// `A`
    Upper,
    /// `a`
    Lower,
}

impl SlotClass {
    fn from_pattern_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Digit),
            'A' => Some(Self::Upper),
            'a' => Some(Self::Lower),
            _ => None,
        }
    }

    pub fn pattern_char(self) -> char {
        match self {
            Self::Digit => '0',
            Self::Upper => 'A',
            Self::Lower => 'a',
        }
    }

    /// The character as it should be displayed, or `None` if it does not fit.
    ///
    /// Letter slots take letters in either case and normalize them.
    pub fn accept(self, c: char) -> Option<char> {
        match self {
            Self::Digit if c.is_ascii_digit() => Some(c),
            Self::Upper if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
            Self::Lower if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskToken {
    Slot(SlotClass),
    Literal(char),
}

impl MaskToken {
    #[inline]
    pub fn is_slot(self) -> bool {
        matches!(self, Self::Slot(_))
    }
}

/// A parsed mask. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaskPattern {
    source: String,
    tokens: Vec<MaskToken>,
}

impl MaskPattern {
    pub fn new(pattern: &str) -> Self {
        let tokens = pattern
            .chars()
            .map(|c| SlotClass::from_pattern_char(c).map_or(MaskToken::Literal(c), MaskToken::Slot))
            .collect();
        Self {
            source: pattern.to_string(),
            tokens,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[MaskToken] {
        &self.tokens
    }

    /// Pattern length in characters; also the length of a complete value.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_slot()).count()
    }

    pub fn token_at(&self, index: usize) -> Option<MaskToken> {
        self.tokens.get(index).copied()
    }

    /// `false` past the end of the pattern.
    pub fn is_literal_at(&self, index: usize) -> bool {
        matches!(self.token_at(index), Some(MaskToken::Literal(_)))
    }

    /// Format raw input against the pattern.
    ///
    /// The input is first reduced to ASCII letters and digits. Slots take one
    /// input character each; the first character that does not fit its slot
    /// stops formatting. Literals are always emitted, and swallow the next
    /// input character when it is that same literal. Input left over once the
    /// pattern is exhausted is dropped.
    ///
    /// ```
    /// use mask::MaskPattern;
    ///
    /// let plate = MaskPattern::new("AAA-0A00");
    /// assert_eq!(plate.apply("abc1d23"), "ABC-1D23");
    /// assert_eq!(plate.apply("ab1"), "AB");
    /// ```
    pub fn apply(&self, raw: &str) -> String {
        let input: Vec<char> = raw.chars().filter(char::is_ascii_alphanumeric).collect();
        let mut out = String::with_capacity(self.source.len());
        let mut next = 0;

        for token in &self.tokens {
            let Some(&c) = input.get(next) else {
                break;
            };
            match *token {
                MaskToken::Slot(class) => match class.accept(c) {
                    Some(shown) => {
                        out.push(shown);
                        next += 1;
                    }
                    None => break,
                },
                MaskToken::Literal(lit) => {
                    out.push(lit);
                    if c == lit {
                        next += 1;
                    }
                }
            }
        }

        out
    }

    /// Strip the literals back out of a displayed value.
    ///
    /// Each slot position takes whatever character is there. A literal
    /// position advances only on an exact match; a mismatching character is
    /// skipped and the same literal is tried against the next one.
    pub fn unmask(&self, display: &str) -> String {
        let mut out = String::with_capacity(display.len());
        let mut tokens = self.tokens.iter().peekable();

        for c in display.chars() {
            let Some(token) = tokens.peek() else {
                break;
            };
            match **token {
                MaskToken::Slot(_) => {
                    out.push(c);
                    tokens.next();
                }
                MaskToken::Literal(lit) if lit == c => {
                    tokens.next();
                }
                MaskToken::Literal(_) => {}
            }
        }

        out
    }

    pub fn is_complete(&self, display: &str) -> bool {
        display.chars().count() == self.len()
    }
}

impl FromStr for MaskPattern {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for MaskPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// One-off [`MaskPattern::apply`].
pub fn mask(pattern: &str, raw: &str) -> String {
    MaskPattern::new(pattern).apply(raw)
}

/// One-off [`MaskPattern::unmask`].
pub fn unmask(pattern: &str, display: &str) -> String {
    MaskPattern::new(pattern).unmask(display)
}

/// Keep ASCII letters and digits only.
pub fn clean_value(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}
