//! # password
//!
//! Five-point strength meter and confirmation check.
//!
//! Each satisfied requirement is worth 20 points: minimum length, an
//! uppercase letter, a lowercase letter, a digit, and a symbol from
//! [`SPECIAL_CHARS`].
//!
//! ```
//! use password::{PasswordPolicy, StrengthLevel, evaluate};
//!
//! let policy = PasswordPolicy::default();
//! assert_eq!(evaluate("Abc123!@", &policy).level, StrengthLevel::Strong);
//! assert_eq!(evaluate("abc", &policy).score, 20);
//! ```

mod strength;

pub use strength::{
    MatchState, PasswordPolicy, Requirement, Requirements, SPECIAL_CHARS, Strength,
    StrengthLevel, confirmation, evaluate,
};
