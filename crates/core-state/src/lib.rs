//! Status model: the per-level context table and the composed status
//! string it produces.
//!
//! This crate owns no rendering; it only answers "what is the status text
//! right now" and tracks the width `core-render` last drew, so the renderer
//! knows how much of the previous line to erase.

use std::collections::BTreeMap;

/// Two literal spaces join the per-level segments in the composed status.
const LEVEL_JOIN: &str = "  ";

/// Most-recent matching line text at each context level. Gaps are
/// permitted: a level with no entry yet contributes an empty slot.
#[derive(Debug, Clone, Default)]
pub struct ContextTable {
    levels: BTreeMap<u32, String>,
}

impl ContextTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `table[level] := text` and drop every entry at a higher level —
    /// a higher-scope context invalidates nested-scope contexts below it.
    pub fn set(&mut self, level: u32, text: String) {
        self.levels.insert(level, text);
        self.levels.retain(|&k, _| k <= level);
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Compose the status string: `table[0], table[1], … table[Lmax]`,
    /// missing keys contributing empty strings, joined by two spaces.
    /// Embedded newlines/trailing whitespace in any entry are preserved.
    ///
    /// This is the *live* single-row form used for the overwriting status
    /// line (§4.3/§4.4); see [`ContextTable::committed_lines`] for the
    /// one-line-per-level form used once a status is promoted to
    /// permanent output.
    pub fn composed(&self) -> String {
        let Some(&max_level) = self.levels.keys().next_back() else {
            return String::new();
        };
        let mut out = String::new();
        for level in 0..=max_level {
            if level > 0 {
                out.push_str(LEVEL_JOIN);
            }
            if let Some(text) = self.levels.get(&level) {
                out.push_str(text);
            }
        }
        out
    }

    /// One entry per level from `0..=Lmax`, empty for a gap, in ascending
    /// order. Unlike [`ContextTable::composed`], this is never joined onto
    /// one row — it is the representation used when a status is committed
    /// to permanent (scrolled) output, where each level gets its own line.
    pub fn committed_lines(&self) -> Vec<&str> {
        let Some(&max_level) = self.levels.keys().next_back() else {
            return Vec::new();
        };
        (0..=max_level)
            .map(|level| self.levels.get(&level).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

/// Holds the context table plus the width of the last status draw. Tracks
/// only what the renderer needs to erase the previous draw; it does not
/// know whether the sink is a terminal.
#[derive(Debug, Clone, Default)]
pub struct StatusState {
    table: ContextTable,
    last_rendered_width: usize,
}

impl StatusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_context(&mut self, level: u32, text: String) {
        tracing::trace!(target: "status", level, "context_update");
        self.table.set(level, text);
    }

    pub fn composed(&self) -> String {
        self.table.composed()
    }

    /// See [`ContextTable::committed_lines`]: the multi-line form written
    /// when a status is promoted to permanent output on a `Regular` line.
    pub fn committed_block(&self) -> String {
        self.table.committed_lines().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn last_rendered_width(&self) -> usize {
        self.last_rendered_width
    }

    pub fn set_last_rendered_width(&mut self, width: usize) {
        self.last_rendered_width = width;
    }
}
