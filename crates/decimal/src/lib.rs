//! # decimal
//!
//! Fixed-precision number display in the `1.234.567,89` style, with optional
//! prefix/suffix (`R$ `, ` kg`), and the "cash register" entry mode used by
//! bound inputs: every digit typed shifts the value left by one minor unit.
//!
//! ```
//! use decimal::{DecimalConfig, format, parse};
//!
//! let brl = DecimalConfig::default().with_prefix("R$ ");
//! assert_eq!(format(1234.5, &brl), "R$ 1.234,50");
//! assert_eq!(parse("R$ 1.234,50", &brl), 1234.5);
//! ```
//!
//! Formatting and parsing are total. Unparsable text is zero, `NaN` formats
//! as the empty string.

mod config;
mod format;
pub mod live;

pub use config::{DecimalConfig, MAX_DECIMAL_PLACES};
pub use format::{format, parse, parse_canonical};
pub use live::{MinorEntry, SignRule};
