//! # input_core
//!
//! UI-agnostic input state for headless form controls.
//!
//! - [`InputId`]: opaque key for an input, convertible from [`dom::Id`]
//! - [`InputValueStore`]: value, caret and selection per input
//! - [`InputStore`]: the trait controllers are written against
//! - [`SelectionRange`]: normalized byte range
//!
//! Carets are stored as byte offsets on UTF-8 boundaries. Formatting
//! controllers think in characters, so the store also exposes char-indexed
//! accessors ([`InputValueStore::caret_chars`],
//! [`InputValueStore::replace_value`]).
//!
//! A controller rewriting a field after a keystroke typically does:
//!
//! ```
//! use input_core::{InputId, InputValueStore};
//!
//! let mut store = InputValueStore::new();
//! let id = InputId::from_raw(7);
//! store.ensure_initial(id, "123".to_string());
//! store.insert_text(id, "4");
//!
//! // reformat and land the caret after the last typed character
//! store.replace_value(id, "123.4".to_string(), 5);
//! assert_eq!(store.get(id), Some("123.4"));
//! assert_eq!(store.caret_chars(id), Some(5));
//! ```

mod id;
mod selection;
mod state;
mod store;
mod text;
mod traits;

pub use id::InputId;
pub use selection::SelectionRange;
pub use store::InputValueStore;
pub use text::{
    byte_offset_of_char, char_index_of_byte, clamp_to_char_boundary, filter_single_line,
    next_cursor_boundary, prev_cursor_boundary,
};
pub use traits::InputStore;
