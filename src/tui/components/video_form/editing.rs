//! Byte-offset helpers for single-line editing.
//!
//! All offsets are byte positions in the buffer and always land on a char
//! boundary. Display columns come from `unicode-width` so wide characters
//! take two cells.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Find the byte offset of the previous character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// URL-aware word characters: `/`, `?`, `=`, `&`, `.` and `:` separate words,
/// while `-` and `_` stay inside them (video ids use both).
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Backward-word: skip separators, then skip word characters.
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[..pos].char_indices().rev().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }

    let mut boundary = 0;
    while let Some(&(i, c)) = chars.peek() {
        if !is_word_char(c) {
            boundary = i + c.len_utf8();
            break;
        }
        boundary = i;
        chars.next();
    }
    boundary
}

/// Forward-word: skip separators, then skip word characters.
pub(super) fn next_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[pos..].char_indices().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }
    while chars.peek().is_some_and(|&(_, c)| is_word_char(c)) {
        chars.next();
    }

    match chars.peek() {
        Some(&(i, _)) => pos + i,
        None => text.len(),
    }
}

/// Display column of byte offset `pos`.
pub(super) fn column_of(text: &str, pos: usize) -> usize {
    text[..pos].width()
}

/// The slice of `text` visible when the first `scroll` columns are hidden
/// and `width` columns are available.
pub(super) fn visible_slice(text: &str, scroll: usize, width: usize) -> &str {
    let mut col = 0;
    let mut start = text.len();
    let mut end = text.len();
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if col >= scroll && start == text.len() {
            start = i;
        }
        if col + w > scroll + width {
            end = i;
            break;
        }
        col += w;
    }
    if start > end {
        return "";
    }
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_boundaries_respect_multibyte() {
        let s = "aé"; // é is two bytes
        assert_eq!(next_char_boundary(s, 1), 3);
        assert_eq!(prev_char_boundary(s, 3), 1);
        assert_eq!(prev_char_boundary(s, 0), 0);
        assert_eq!(next_char_boundary(s, 3), 3);
    }

    #[test]
    fn word_jumps_stop_at_url_separators() {
        let url = "https://youtu.be/XYZ-789";
        assert_eq!(prev_word_boundary(url, url.len()), 17);
        assert_eq!(prev_word_boundary(url, 17), 14);
        assert_eq!(next_word_boundary(url, 0), 5);
        assert_eq!(next_word_boundary(url, 5), 13);
        assert_eq!(next_word_boundary(url, 17), url.len());
    }

    #[test]
    fn word_jump_at_edges() {
        assert_eq!(prev_word_boundary("abc", 0), 0);
        assert_eq!(next_word_boundary("abc", 3), 3);
        assert_eq!(prev_word_boundary("///", 3), 0);
    }

    #[test]
    fn visible_slice_scrolls_by_columns() {
        assert_eq!(visible_slice("abcdef", 0, 3), "abc");
        assert_eq!(visible_slice("abcdef", 2, 3), "cde");
        assert_eq!(visible_slice("abcdef", 4, 10), "ef");
        assert_eq!(visible_slice("abc", 5, 3), "");
    }

    #[test]
    fn column_counts_wide_chars_twice() {
        assert_eq!(column_of("日本", "日本".len()), 4);
        assert_eq!(column_of("ab", 1), 1);
    }
}
