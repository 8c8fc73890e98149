//! Pure line-framing logic (spec component A, minus I/O and the timeout).
//!
//! `LineAccumulator` has no knowledge of sockets, threads, or clocks. The
//! binary feeds it decoded text chunks as they arrive off the reader thread
//! and, independently, decides when the partial-line timeout has elapsed
//! and calls [`LineAccumulator::flush_partial`]. Keeping the clock outside
//! this type is what makes the framing rules themselves trivially testable.

/// One framing event produced while splitting a decoded byte stream into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent {
    /// A line with no embedded newline, ready for classification.
    CompleteLine(String),
    /// Text newly buffered since the last flush/newline, flushed because
    /// the partial-line timeout fired. Rendered by printing it directly
    /// (it is not an overwritable status) — never classified on its own.
    PartialFlush(String),
    /// Emitted once a newline finally arrives after one or more
    /// `PartialFlush`es. Always classified as `Regular`, never re-evaluated
    /// against configured patterns. Carries two views of the line:
    /// - `full`: every flushed segment plus whatever came after the last
    ///   flush, concatenated — what a sink that never saw the preview
    ///   (an auxiliary file, a non-terminal stdout) needs written in full.
    /// - `unflushed_tail`: only the part that arrived since the last
    ///   flush (or since the start of the line, if it arrived together
    ///   with the newline) — the part an `Overwriting` terminal has *not*
    ///   already echoed live via `PartialFlush`, and so the only part it
    ///   still needs to print before terminating the line.
    EndOfPartialRun { full: String, unflushed_tail: String },
}

#[derive(Default)]
pub struct LineAccumulator {
    /// Text buffered since the last flush (or since the last newline, if
    /// no flush has happened yet).
    buf: String,
    /// Concatenation of every segment already delivered via `PartialFlush`
    /// since the last newline. Empty unless a bypass run is in progress.
    bypass_prefix: String,
    flushed_since_newline: bool,
}

impl LineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest newly decoded text, splitting out every complete line it
    /// contains. The incomplete tail (if any) stays buffered.
    pub fn push(&mut self, text: &str) -> Vec<FrameEvent> {
        let mut events = Vec::new();
        let mut rest = text;
        while let Some(idx) = rest.find('\n') {
            self.buf.push_str(&rest[..idx]);
            rest = &rest[idx + 1..];
            let segment = std::mem::take(&mut self.buf);
            if self.flushed_since_newline {
                self.flushed_since_newline = false;
                let unflushed_tail = segment.clone();
                self.bypass_prefix.push_str(&segment);
                let full = std::mem::take(&mut self.bypass_prefix);
                events.push(FrameEvent::EndOfPartialRun { full, unflushed_tail });
            } else {
                events.push(FrameEvent::CompleteLine(segment));
            }
        }
        self.buf.push_str(rest);
        events
    }

    /// Flush the text newly buffered since the last flush/newline as a
    /// `PartialFlush`. Called by the binary when the partial-line timeout
    /// fires. Returns `None` if nothing new has accumulated.
    pub fn flush_partial(&mut self) -> Option<FrameEvent> {
        if self.buf.is_empty() {
            return None;
        }
        let segment = std::mem::take(&mut self.buf);
        self.bypass_prefix.push_str(&segment);
        self.flushed_since_newline = true;
        Some(FrameEvent::PartialFlush(segment))
    }

    /// True if a `PartialFlush` has occurred since the last complete line,
    /// i.e. the next newline will close out a bypass line.
    pub fn in_bypass_run(&self) -> bool {
        self.flushed_since_newline
    }

    /// Remaining unterminated tail at end-of-stream, if non-empty, framed
    /// the same way a terminated line would be: `CompleteLine` if nothing
    /// of it was ever shown as a live preview, or `EndOfPartialRun` (still
    /// carrying `unflushed_tail` separately from `full`) if at least one
    /// `PartialFlush` already echoed part of it — the caller must route
    /// this the same bypass-aware way it would an ordinary
    /// `EndOfPartialRun`, never back through classification (§3
    /// Lifecycle: a trailing partial line is surfaced, not re-evaluated).
    pub fn take_final_partial(&mut self) -> Option<FrameEvent> {
        let tail = std::mem::take(&mut self.buf);
        self.flushed_since_newline = false;
        if self.bypass_prefix.is_empty() {
            if tail.is_empty() { None } else { Some(FrameEvent::CompleteLine(tail)) }
        } else {
            let mut full = std::mem::take(&mut self.bypass_prefix);
            full.push_str(&tail);
            Some(FrameEvent::EndOfPartialRun { full, unflushed_tail: tail })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_chunk_with_trailing_newline_yields_complete_lines() {
        let mut acc = LineAccumulator::new();
        let events = acc.push("gcc a.c\ngcc b.c\n");
        assert_eq!(
            events,
            vec![
                FrameEvent::CompleteLine("gcc a.c".into()),
                FrameEvent::CompleteLine("gcc b.c".into()),
            ]
        );
        assert_eq!(acc.take_final_partial(), None);
    }

    #[test]
    fn split_across_chunks_reassembles_line() {
        let mut acc = LineAccumulator::new();
        assert_eq!(acc.push("hello "), vec![]);
        assert_eq!(
            acc.push("world\n"),
            vec![FrameEvent::CompleteLine("hello world".into())]
        );
    }

    #[test]
    fn partial_flush_then_newline_yields_full_bypass_line() {
        let mut acc = LineAccumulator::new();
        acc.push("Enter pw: ");
        let flushed = acc.flush_partial().unwrap();
        assert_eq!(flushed, FrameEvent::PartialFlush("Enter pw: ".into()));
        assert!(acc.in_bypass_run());

        let events = acc.push("\n");
        assert_eq!(
            events,
            vec![FrameEvent::EndOfPartialRun {
                full: "Enter pw: ".into(),
                unflushed_tail: String::new(),
            }]
        );
        assert!(!acc.in_bypass_run());
    }

    #[test]
    fn bytes_after_flush_accumulate_into_full_bypass_line() {
        let mut acc = LineAccumulator::new();
        acc.push("go");
        acc.flush_partial().unwrap();
        acc.push("ing");
        let events = acc.push("!\n");
        assert_eq!(
            events,
            vec![FrameEvent::EndOfPartialRun {
                full: "going!".into(),
                unflushed_tail: "ing!".into(),
            }]
        );
    }

    #[test]
    fn multiple_flushes_before_newline_concatenate_in_order() {
        let mut acc = LineAccumulator::new();
        acc.push("a");
        acc.flush_partial().unwrap();
        acc.push("b");
        acc.flush_partial().unwrap();
        let events = acc.push("c\n");
        assert_eq!(
            events,
            vec![FrameEvent::EndOfPartialRun {
                full: "abc".into(),
                unflushed_tail: "c".into(),
            }]
        );
    }

    #[test]
    fn flush_partial_on_empty_buffer_is_noop() {
        let mut acc = LineAccumulator::new();
        assert_eq!(acc.flush_partial(), None);
    }

    #[test]
    fn final_partial_surfaced_at_end_of_stream() {
        let mut acc = LineAccumulator::new();
        acc.push("no newline here");
        assert_eq!(
            acc.take_final_partial(),
            Some(FrameEvent::CompleteLine("no newline here".to_string()))
        );
        assert_eq!(acc.take_final_partial(), None);
    }

    #[test]
    fn final_partial_includes_already_flushed_prefix() {
        let mut acc = LineAccumulator::new();
        acc.push("partial");
        acc.flush_partial().unwrap();
        acc.push(" more");
        assert_eq!(
            acc.take_final_partial(),
            Some(FrameEvent::EndOfPartialRun {
                full: "partial more".to_string(),
                unflushed_tail: " more".to_string(),
            })
        );
    }

    #[test]
    fn final_partial_previewed_with_nothing_new_since_last_flush() {
        let mut acc = LineAccumulator::new();
        acc.push("partial");
        acc.flush_partial().unwrap();
        assert_eq!(
            acc.take_final_partial(),
            Some(FrameEvent::EndOfPartialRun {
                full: "partial".to_string(),
                unflushed_tail: String::new(),
            })
        );
    }
}
