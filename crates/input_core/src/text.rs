//! UTF-8 caret helpers.
//!
//! The store keeps carets as byte offsets; formatting code counts characters.
//! These helpers convert between the two without ever splitting a scalar value.

use std::borrow::Cow;

/// Clamp `index` to `s.len()` and back it off to the nearest char boundary.
///
/// ```
/// use input_core::clamp_to_char_boundary;
///
/// let s = "R$ 1€";
/// assert_eq!(clamp_to_char_boundary(s, 5), 4); // mid '€'
/// assert_eq!(clamp_to_char_boundary(s, 99), s.len());
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Char boundary immediately before `i` (0 at the start).
pub fn prev_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[..i].char_indices().last().map_or(0, |(idx, _)| idx)
}

/// Char boundary immediately after `i` (`s.len()` at the end).
pub fn next_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[i..].chars().next().map_or(s.len(), |c| i + c.len_utf8())
}

/// Byte offset of the `n`-th character; `s.len()` when `n` is past the end.
///
/// ```
/// use input_core::byte_offset_of_char;
///
/// assert_eq!(byte_offset_of_char("€12", 1), 3);
/// assert_eq!(byte_offset_of_char("€12", 9), 5);
/// ```
pub fn byte_offset_of_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(idx, _)| idx)
}

/// Number of characters before byte offset `i` (clamped to a boundary first).
pub fn char_index_of_byte(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[..i].chars().count()
}

/// Drop CR/LF for single-line inputs; borrows when there is nothing to drop.
///
/// ```
/// use input_core::filter_single_line;
///
/// assert_eq!(filter_single_line("123\r\n456"), "123456");
/// ```
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if !s.contains(['\n', '\r']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| *c != '\n' && *c != '\r').collect())
}
