//! Display width measurement.
//!
//! Deliberately naive: one column per `char` as reported by
//! `unicode_width::UnicodeWidthChar`, not a grapheme-cluster-aware engine.
//! Wide or combining characters may therefore under- or over-erase the
//! previous status line. That is a known, accepted limitation, not a bug
//! to fix here.

use unicode_width::UnicodeWidthChar;

/// Printable column width of `s`, summing each `char`'s width (0 for
/// combining marks, 1 for most scripts, 2 for wide CJK/emoji).
pub fn display_width(s: &str) -> usize {
    s.chars().map(|c| UnicodeWidthChar::width(c).unwrap_or(0)).sum()
}

/// Truncate `s` to at most `max_width` display columns, returning the
/// truncated string. Truncation is a simple character-count cut (no ANSI
/// parsing): if a wide character would straddle the boundary it is dropped
/// entirely rather than split.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut used = 0usize;
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out
}
