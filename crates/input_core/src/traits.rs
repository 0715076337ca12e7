//! The store interface binding controllers are written against.
//!
//! Integration layers convert their own ids (e.g. `dom::Id`) to [`InputId`]
//! at the call boundary:
//!
//! ```
//! use input_core::{InputId, InputStore, InputValueStore};
//!
//! fn clear_field(store: &mut impl InputStore, node: dom::Id) {
//!     store.set_value(InputId::from(node), String::new(), 0);
//! }
//!
//! let mut store = InputValueStore::new();
//! clear_field(&mut store, dom::Id(3));
//! assert_eq!(store.value(InputId::from(dom::Id(3))), Some(""));
//! ```

use crate::id::InputId;
use crate::selection::SelectionRange;
use crate::store::InputValueStore;

pub trait InputStore {
    /// Insert an entry unless one exists.
    fn ensure_initial(&mut self, id: InputId, initial: String);

    fn focus(&mut self, id: InputId);

    fn blur(&mut self, id: InputId);

    fn insert_text(&mut self, id: InputId, text: &str);

    fn backspace(&mut self, id: InputId);

    fn delete(&mut self, id: InputId);

    /// Replace the whole value; caret is a character index.
    fn set_value(&mut self, id: InputId, value: String, caret_chars: usize) -> bool;

    fn value(&self, id: InputId) -> Option<&str>;

    /// Select between two character indices, caret at `caret_chars`.
    fn select(&mut self, id: InputId, anchor_chars: usize, caret_chars: usize);

    fn select_all(&mut self, id: InputId);

    /// Caret as a character index.
    fn caret_chars(&self, id: InputId) -> Option<usize>;

    fn selection(&self, id: InputId) -> Option<SelectionRange>;

    fn value_revision(&self, id: InputId) -> u64;

    fn forget(&mut self, id: InputId) -> bool;
}

impl InputStore for InputValueStore {
    #[inline]
    fn ensure_initial(&mut self, id: InputId, initial: String) {
        InputValueStore::ensure_initial(self, id, initial)
    }

    #[inline]
    fn focus(&mut self, id: InputId) {
        InputValueStore::focus(self, id)
    }

    #[inline]
    fn blur(&mut self, id: InputId) {
        InputValueStore::blur(self, id)
    }

    #[inline]
    fn insert_text(&mut self, id: InputId, text: &str) {
        InputValueStore::insert_text(self, id, text)
    }

    #[inline]
    fn backspace(&mut self, id: InputId) {
        InputValueStore::backspace(self, id)
    }

    #[inline]
    fn delete(&mut self, id: InputId) {
        InputValueStore::delete(self, id)
    }

    #[inline]
    fn set_value(&mut self, id: InputId, value: String, caret_chars: usize) -> bool {
        self.replace_value(id, value, caret_chars)
    }

    #[inline]
    fn value(&self, id: InputId) -> Option<&str> {
        self.get(id)
    }

    #[inline]
    fn select(&mut self, id: InputId, anchor_chars: usize, caret_chars: usize) {
        self.select_chars(id, anchor_chars, caret_chars)
    }

    #[inline]
    fn select_all(&mut self, id: InputId) {
        InputValueStore::select_all(self, id)
    }

    #[inline]
    fn caret_chars(&self, id: InputId) -> Option<usize> {
        InputValueStore::caret_chars(self, id)
    }

    #[inline]
    fn selection(&self, id: InputId) -> Option<SelectionRange> {
        InputValueStore::selection(self, id)
    }

    #[inline]
    fn value_revision(&self, id: InputId) -> u64 {
        InputValueStore::value_revision(self, id)
    }

    #[inline]
    fn forget(&mut self, id: InputId) -> bool {
        self.remove(id)
    }
}
