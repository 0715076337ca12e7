//! Central store for input values, carets and selections.
//!
//! The store does no formatting. Controllers read the raw value after the
//! host applied an edit, compute the display value, and write it back with
//! [`InputValueStore::replace_value`].

use crate::id::InputId;
use crate::selection::SelectionRange;
use crate::state::InputState;
use crate::text::{
    byte_offset_of_char, char_index_of_byte, clamp_to_char_boundary, filter_single_line,
    next_cursor_boundary, prev_cursor_boundary,
};
use std::collections::HashMap;

/// Value, caret and selection for every tracked input.
///
/// ```
/// use input_core::{InputId, InputValueStore};
///
/// let mut store = InputValueStore::new();
/// let id = InputId::from_raw(1);
///
/// store.ensure_initial(id, "(11) 9".to_string());
/// store.insert_text(id, "8");
///
/// assert_eq!(store.get(id), Some("(11) 98"));
/// assert_eq!(store.caret_chars(id), Some(7));
/// ```
#[derive(Clone, Debug, Default)]
pub struct InputValueStore {
    values: HashMap<InputId, InputState>,
}

impl InputValueStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn has(&self, id: InputId) -> bool {
        self.values.contains_key(&id)
    }

    pub fn get(&self, id: InputId) -> Option<&str> {
        self.values.get(&id).map(|s| s.value.as_str())
    }

    /// Caret as a byte offset.
    pub fn caret(&self, id: InputId) -> Option<usize> {
        self.values.get(&id).map(|s| s.caret)
    }

    /// Caret as a character index.
    pub fn caret_chars(&self, id: InputId) -> Option<usize> {
        self.values
            .get(&id)
            .map(|s| char_index_of_byte(&s.value, s.caret))
    }

    pub fn selection(&self, id: InputId) -> Option<SelectionRange> {
        let st = self.values.get(&id)?;
        selection_range(&st.value, st.selection_anchor, st.caret)
    }

    /// Increments on every text change; 0 for unknown inputs.
    pub fn value_revision(&self, id: InputId) -> u64 {
        self.values.get(&id).map_or(0, |s| s.value_rev)
    }

    /// Overwrite the value, caret at the end, selection cleared.
    pub fn set(&mut self, id: InputId, value: String) {
        let st = self.values.entry(id).or_default();
        st.caret = value.len();
        st.value = value;
        st.selection_anchor = None;
        mark_text_dirty(st);
    }

    /// Overwrite the value and put the caret at character index `caret_chars`
    /// (clamped to the new value). Returns `true` if the text changed.
    pub fn replace_value(&mut self, id: InputId, value: String, caret_chars: usize) -> bool {
        let st = self.values.entry(id).or_default();
        let changed = st.value != value;
        st.caret = byte_offset_of_char(&value, caret_chars);
        st.value = value;
        st.selection_anchor = None;
        if changed {
            mark_text_dirty(st);
        }
        changed
    }

    /// Insert an entry unless one exists. Caret starts at the end.
    pub fn ensure_initial(&mut self, id: InputId, initial: String) {
        self.values
            .entry(id)
            .or_insert_with(|| InputState::with_value(initial));
    }

    /// Forget an input entirely.
    pub fn remove(&mut self, id: InputId) -> bool {
        self.values.remove(&id).is_some()
    }

    pub fn focus(&mut self, id: InputId) {
        if let Some(st) = self.values.get_mut(&id) {
            clamp_state(st);
            st.selection_anchor = None;
        }
    }

    pub fn blur(&mut self, id: InputId) {
        if let Some(st) = self.values.get_mut(&id) {
            clamp_state(st);
            st.selection_anchor = None;
        }
    }

    /// Type `s` at the caret, replacing any selection. Newlines are dropped.
    pub fn insert_text(&mut self, id: InputId, s: &str) {
        let st = self.values.entry(id).or_default();
        clamp_state(st);
        let s = filter_single_line(s);
        if s.is_empty() {
            return;
        }

        delete_selection_if_any(st);

        let caret = clamp_to_char_boundary(&st.value, st.caret);
        st.value.insert_str(caret, &s);
        st.caret = caret + s.len();
        mark_text_dirty(st);
    }

    /// Delete the character before the caret, or the selection.
    pub fn backspace(&mut self, id: InputId) {
        let Some(st) = self.values.get_mut(&id) else {
            return;
        };
        clamp_state(st);
        if delete_selection_if_any(st) || st.caret == 0 {
            return;
        }

        let prev = prev_cursor_boundary(&st.value, st.caret);
        st.value.drain(prev..st.caret);
        st.caret = prev;
        mark_text_dirty(st);
    }

    /// Delete the character after the caret, or the selection.
    pub fn delete(&mut self, id: InputId) {
        let Some(st) = self.values.get_mut(&id) else {
            return;
        };
        clamp_state(st);
        if delete_selection_if_any(st) || st.caret >= st.value.len() {
            return;
        }

        let next = next_cursor_boundary(&st.value, st.caret);
        st.value.drain(st.caret..next);
        mark_text_dirty(st);
    }

    /// Move the caret to a byte offset, optionally extending the selection.
    pub fn set_caret(&mut self, id: InputId, caret: usize, selecting: bool) {
        let st = self.values.entry(id).or_default();
        clamp_state(st);
        let caret = clamp_to_char_boundary(&st.value, caret);

        if selecting {
            if st.selection_anchor.is_none() {
                st.selection_anchor = Some(st.caret);
            }
            st.caret = caret;
            if st.selection_anchor == Some(st.caret) {
                st.selection_anchor = None;
            }
        } else {
            st.caret = caret;
            st.selection_anchor = None;
        }
    }

    /// Select from character index `anchor_chars` to `caret_chars`; the
    /// caret ends at `caret_chars`. Equal indices just place the caret.
    pub fn select_chars(&mut self, id: InputId, anchor_chars: usize, caret_chars: usize) {
        let Some(value) = self.get(id) else {
            return;
        };
        let anchor = byte_offset_of_char(value, anchor_chars);
        let caret = byte_offset_of_char(value, caret_chars);
        self.set_caret(id, anchor, false);
        self.set_caret(id, caret, true);
    }

    pub fn select_all(&mut self, id: InputId) {
        let st = self.values.entry(id).or_default();
        st.caret = st.value.len();
        st.selection_anchor = (!st.value.is_empty()).then_some(0);
    }
}

fn selection_range(value: &str, anchor: Option<usize>, caret: usize) -> Option<SelectionRange> {
    let a = clamp_to_char_boundary(value, anchor?);
    let c = clamp_to_char_boundary(value, caret);
    (a != c).then(|| SelectionRange::new(a, c))
}

fn delete_selection_if_any(st: &mut InputState) -> bool {
    let Some(sel) = selection_range(&st.value, st.selection_anchor, st.caret) else {
        st.selection_anchor = None;
        return false;
    };

    st.value.drain(sel.start..sel.end);
    st.caret = sel.start;
    st.selection_anchor = None;
    mark_text_dirty(st);
    true
}

fn clamp_state(st: &mut InputState) {
    st.caret = clamp_to_char_boundary(&st.value, st.caret);
    if let Some(a) = st.selection_anchor {
        st.selection_anchor = Some(clamp_to_char_boundary(&st.value, a));
    }
}

fn mark_text_dirty(st: &mut InputState) {
    st.value_rev = st.value_rev.wrapping_add(1);
}
