//! Terminal column width query.

/// Current terminal width in columns, or `None` if it can't be determined
/// (e.g. the primary sink isn't a terminal). Callers re-query this on every
/// status draw rather than caching it — the window may be resized mid-run
/// and a stale width would mis-pad the overwrite.
pub fn terminal_width() -> Option<usize> {
    crossterm::terminal::size().ok().map(|(cols, _rows)| cols as usize)
}
