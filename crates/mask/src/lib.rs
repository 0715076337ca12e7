//! # mask
//!
//! Fixed-shape text masks such as `000.000.000-00` or `AAA-0A00`.
//!
//! A pattern is read one character at a time:
//!
//! - `0` is a slot for one ASCII digit
//! - `A` is a slot for one ASCII letter, stored uppercase
//! - `a` is a slot for one ASCII letter, stored lowercase
//! - anything else is a literal inserted automatically
//!
//! ```
//! use mask::MaskPattern;
//!
//! let cpf = MaskPattern::new("000.000.000-00");
//! let shown = cpf.apply("12345678901");
//! assert_eq!(shown, "123.456.789-01");
//! assert_eq!(cpf.unmask(&shown), "12345678901");
//! assert!(cpf.is_complete(&shown));
//! ```
//!
//! Everything here is total: garbage in gives a (possibly empty) prefix of the
//! pattern out, never an error.

mod pattern;
pub mod presets;
mod registry;

pub use pattern::{MaskPattern, MaskToken, SlotClass, clean_value, mask, unmask};
pub use registry::MaskRegistry;
