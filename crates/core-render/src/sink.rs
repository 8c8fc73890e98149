//! A single output destination and the overwrite/plain write rules that
//! apply to it.

use std::io::{self, Write};

use core_text::{display_width, truncate_to_width};

/// How a sink renders a live status update. Only a `SinkKind::Terminal`
/// primary sink is ever `Overwriting`; every other sink — a redirected
/// stdout, or any auxiliary file — is `Plain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Overwriting,
    Plain { strip: bool },
}

/// One output destination: the primary sink (stdout) or one of the named
/// `OUTFILE` arguments.
pub struct Sink {
    label: String,
    writer: Box<dyn Write + Send>,
    mode: Mode,
    is_primary: bool,
    last_rendered_width: usize,
}

impl Sink {
    pub fn new(label: impl Into<String>, writer: Box<dyn Write + Send>, mode: Mode, is_primary: bool) -> Self {
        Self {
            label: label.into(),
            writer,
            mode,
            is_primary,
            last_rendered_width: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn last_rendered_width(&self) -> usize {
        self.last_rendered_width
    }

    fn flush_if_primary(&mut self) -> io::Result<()> {
        if self.is_primary {
            self.writer.flush()?;
        }
        Ok(())
    }

    /// Live status draw. `term_width` truncates an `Overwriting` draw; it
    /// is ignored for `Plain` sinks.
    pub fn update_status(&mut self, composed: &str, term_width: Option<usize>) -> io::Result<()> {
        match self.mode {
            Mode::Overwriting => {
                let budget = term_width.unwrap_or(usize::MAX);
                let shown = truncate_to_width(composed, budget);
                let new_width = display_width(&shown);
                let pad = " ".repeat(self.last_rendered_width.saturating_sub(new_width));
                write!(self.writer, "\r{shown}{pad}\r")?;
                self.last_rendered_width = new_width;
                self.flush_if_primary()?;
            }
            Mode::Plain { strip: true } => {}
            Mode::Plain { strip: false } => {
                write!(self.writer, "{composed}\r")?;
                self.flush_if_primary()?;
            }
        }
        Ok(())
    }

    /// Erase whatever is currently drawn on an `Overwriting` sink. No-op on
    /// `Plain` sinks: they never left a live line to erase.
    pub fn clear_status(&mut self) -> io::Result<()> {
        if self.mode == Mode::Overwriting && self.last_rendered_width > 0 {
            write!(self.writer, "\r{}\r", " ".repeat(self.last_rendered_width))?;
            self.last_rendered_width = 0;
            self.flush_if_primary()?;
        }
        Ok(())
    }

    /// Promote the committed status block (one un-truncated line per
    /// level, ascending — see [`core_state::StatusState::committed_block`])
    /// plus a regular line to permanent output. Always written in full,
    /// strip or no-strip — this is retained material, not overwrite noise.
    pub fn commit(&mut self, committed_block: &str, line: &str) -> io::Result<()> {
        self.clear_status()?;
        if !committed_block.is_empty() {
            writeln!(self.writer, "{committed_block}")?;
        }
        writeln!(self.writer, "{line}")?;
        self.flush_if_primary()
    }

    /// Commit a bypass line (`EndOfPartialRun`, §4.1): the text has already
    /// been growing live on an `Overwriting` sink via [`Sink::write_partial`]
    /// as each partial-line timeout fired, so re-printing `full_line` here
    /// would show it twice. `unflushed_tail` is the only part of the line
    /// that sink hasn't already echoed — whatever arrived after the last
    /// flush, bundled in with the newline — so an `Overwriting` sink only
    /// needs to finish printing that and terminate the line. A `Plain`
    /// sink (an auxiliary file, a redirected stdout) never saw any of the
    /// preview, so it still gets `full_line` written out whole, exactly
    /// like an ordinary [`Sink::commit`].
    pub fn commit_bypass(&mut self, committed_block: &str, full_line: &str, unflushed_tail: &str) -> io::Result<()> {
        self.clear_status()?;
        match self.mode {
            Mode::Overwriting => {
                if !unflushed_tail.is_empty() {
                    write!(self.writer, "{unflushed_tail}")?;
                }
                writeln!(self.writer)?;
                if !committed_block.is_empty() {
                    writeln!(self.writer, "{committed_block}")?;
                }
            }
            Mode::Plain { .. } => {
                if !committed_block.is_empty() {
                    writeln!(self.writer, "{committed_block}")?;
                }
                writeln!(self.writer, "{full_line}")?;
            }
        }
        self.flush_if_primary()
    }

    /// A heading: clear any live status, print the heading, then (on
    /// `Overwriting` sinks only) redraw the still-live status underneath it.
    pub fn heading(&mut self, text: &str, composed: &str, term_width: Option<usize>) -> io::Result<()> {
        self.clear_status()?;
        writeln!(self.writer, "{text}")?;
        if self.mode == Mode::Overwriting && !composed.is_empty() {
            self.update_status(composed, term_width)?;
        } else {
            self.flush_if_primary()?;
        }
        Ok(())
    }

    /// Write raw, not-yet-terminated text straight through. Used only for
    /// the partial-line timeout's live preview — the full line is still
    /// coming (as a bypass `Regular` line once the newline finally
    /// arrives), so only the `Overwriting` terminal sink benefits from
    /// seeing it early; writing it to a file sink too would duplicate the
    /// bytes once the bypass line is committed.
    pub fn write_partial(&mut self, text: &str) -> io::Result<()> {
        if self.mode == Mode::Overwriting {
            write!(self.writer, "{text}")?;
            self.flush_if_primary()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn sink(mode: Mode) -> Sink {
        Sink::new("test", Box::new(Vec::<u8>::new()), mode, false)
    }

    /// A `Write` sink backed by a shared buffer, for tests that need to
    /// inspect exactly what bytes were written (not just the tracked
    /// overwrite width).
    #[derive(Clone, Default)]
    struct RecordingBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for RecordingBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl RecordingBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn recording_sink(mode: Mode) -> (Sink, RecordingBuf) {
        let buf = RecordingBuf::default();
        let sink = Sink::new("test", Box::new(buf.clone()), mode, false);
        (sink, buf)
    }

    #[test]
    fn overwriting_draw_tracks_last_width() {
        let mut s = sink(Mode::Overwriting);
        s.update_status("abc", None).unwrap();
        assert_eq!(s.last_rendered_width(), 3);
        s.update_status("ab", None).unwrap();
        assert_eq!(s.last_rendered_width(), 2);
    }

    #[test]
    fn clear_resets_last_width_to_zero() {
        let mut s = sink(Mode::Overwriting);
        s.update_status("status", None).unwrap();
        s.clear_status().unwrap();
        assert_eq!(s.last_rendered_width(), 0);
    }

    #[test]
    fn plain_strip_update_is_noop() {
        let mut s = sink(Mode::Plain { strip: true });
        s.update_status("status", None).unwrap();
        assert_eq!(s.last_rendered_width(), 0);
    }

    #[test]
    fn commit_resets_width_even_without_prior_draw() {
        let mut s = sink(Mode::Plain { strip: false });
        s.commit("ctx", "regular line").unwrap();
        assert_eq!(s.last_rendered_width(), 0);
    }

    #[test]
    fn overwriting_truncates_to_terminal_width() {
        let mut s = sink(Mode::Overwriting);
        s.update_status("hello world", Some(5)).unwrap();
        assert_eq!(s.last_rendered_width(), 5);
    }

    #[test]
    fn heading_redraws_live_status_on_overwriting_sink() {
        let mut s = sink(Mode::Overwriting);
        s.update_status("ctx", None).unwrap();
        s.heading("==== build ====", "ctx", None).unwrap();
        assert_eq!(s.last_rendered_width(), 3);
    }

    /// `write_partial` on an `Overwriting` sink writes the raw preview text
    /// straight through, with no `\r` bracketing and no width tracking —
    /// unlike `update_status`, it isn't part of the overwrite bookkeeping.
    #[test]
    fn write_partial_on_overwriting_sink_writes_raw_text() {
        let (mut s, buf) = recording_sink(Mode::Overwriting);
        s.write_partial("Enter pw: ").unwrap();
        assert_eq!(buf.contents(), "Enter pw: ");
        assert_eq!(s.last_rendered_width(), 0);
    }

    /// `write_partial` is a no-op on a `Plain` sink: an auxiliary file or a
    /// redirected stdout never shows the preview, only the eventual commit.
    #[test]
    fn write_partial_on_plain_sink_is_noop() {
        let (mut s, buf) = recording_sink(Mode::Plain { strip: false });
        s.write_partial("Enter pw: ").unwrap();
        assert_eq!(buf.contents(), "");
    }

    /// `commit_bypass` on an `Overwriting` sink must not re-print text the
    /// sink already echoed via `write_partial` — only `unflushed_tail` (the
    /// part never shown) plus the terminating newline.
    #[test]
    fn commit_bypass_on_overwriting_sink_prints_only_unflushed_tail() {
        let (mut s, buf) = recording_sink(Mode::Overwriting);
        s.write_partial("Enter pw: ").unwrap();
        s.commit_bypass("", "Enter pw: ", "").unwrap();
        assert_eq!(buf.contents(), "Enter pw: \n");
    }

    /// Reproduces the reported bug scenario: two prior previews ("a", "b")
    /// plus a final unflushed tail ("c") that arrived bundled with the
    /// newline. The fix must show "abc\n" exactly once — not duplicate the
    /// already-shown "ab", and not drop the never-shown "c".
    #[test]
    fn commit_bypass_on_overwriting_sink_does_not_duplicate_or_drop_bytes() {
        let (mut s, buf) = recording_sink(Mode::Overwriting);
        s.write_partial("a").unwrap();
        s.write_partial("b").unwrap();
        s.commit_bypass("", "abc", "c").unwrap();
        assert_eq!(buf.contents(), "abc\n");
    }

    /// A `Plain` sink never saw the preview, so `commit_bypass` still
    /// writes `full_line` in full, same as an ordinary `commit`.
    #[test]
    fn commit_bypass_on_plain_sink_writes_full_line() {
        let (mut s, buf) = recording_sink(Mode::Plain { strip: false });
        s.commit_bypass("", "Enter pw: ", "").unwrap();
        assert_eq!(buf.contents(), "Enter pw: \n");
    }

    #[test]
    fn commit_bypass_writes_committed_block_after_overwriting_preview() {
        let (mut s, buf) = recording_sink(Mode::Overwriting);
        s.write_partial("a").unwrap();
        s.commit_bypass("gcc a.c", "a", "").unwrap();
        assert_eq!(buf.contents(), "a\ngcc a.c\n");
    }
}
