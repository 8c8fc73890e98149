//! The pipeline value itself (spec component E): owns the framer, the
//! classifier, the status table, and the renderer, and drives them in the
//! fixed order the spec requires — framer output feeds the classifier,
//! classifier output updates status and/or renders.
//!
//! Deliberately free of threads, channels, and stdin: [`Pipeline`] only
//! knows how to ingest already-decoded-or-decodable bytes and how to react
//! to a partial-line timeout firing. `main` owns the reader thread and the
//! `crossbeam_channel` it posts into; this type is what makes the state
//! machine testable with an in-memory writer and no process spawn.

use std::time::Duration;

use core_model::{Classifier, LineClass};
use core_render::{PteeError, Renderer};
use core_state::StatusState;
use core_text::{Encoding, FrameEvent, LineAccumulator};

pub struct Pipeline {
    encoding: Encoding,
    timeout: Option<Duration>,
    accumulator: LineAccumulator,
    classifier: Classifier,
    status: StatusState,
    renderer: Renderer,
}

impl Pipeline {
    pub fn new(
        encoding: Encoding,
        timeout: Option<Duration>,
        classifier: Classifier,
        renderer: Renderer,
    ) -> Self {
        Self {
            encoding,
            timeout,
            accumulator: LineAccumulator::new(),
            classifier,
            status: StatusState::new(),
            renderer,
        }
    }

    /// The partial-line timeout to wait on between reads. `None` means the
    /// feature is disabled (`--partial-line-timeout 0`): the caller should
    /// still poll (e.g. for a shutdown signal) but must never treat that
    /// poll tick as a real timeout by calling [`Pipeline::handle_timeout`].
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Decode a chunk of raw bytes and feed every complete/bypass line it
    /// produces through the classifier and renderer, in order.
    pub fn ingest_bytes(&mut self, bytes: &[u8]) -> Result<(), PteeError> {
        let (text, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            tracing::warn!(target: "pipeline", "replacement characters substituted for invalid input bytes");
        }
        self.ingest_text(&text)
    }

    fn ingest_text(&mut self, text: &str) -> Result<(), PteeError> {
        let events = self.accumulator.push(text);
        for event in events {
            self.handle_frame_event(event)?;
        }
        Ok(())
    }

    /// The partial-line timeout fired: flush whatever has accumulated since
    /// the last newline/flush as a live, unclassified preview. A no-op if
    /// nothing new has been buffered, and — enforced here rather than
    /// trusted to the caller — a no-op whenever the timeout feature itself
    /// is disabled (`timeout == None`), guaranteeing invariant 6 (`T_partial
    /// = 0` ⇒ no `PartialFlush` is ever produced) regardless of how the
    /// caller schedules its own polling.
    pub fn handle_timeout(&mut self) -> Result<(), PteeError> {
        if self.timeout.is_none() {
            return Ok(());
        }
        if let Some(event) = self.accumulator.flush_partial() {
            self.handle_frame_event(event)?;
        }
        Ok(())
    }

    fn handle_frame_event(&mut self, event: FrameEvent) -> Result<(), PteeError> {
        match event {
            FrameEvent::CompleteLine(text) => match self.classifier.classify(&text, false) {
                None => Ok(()),
                Some(LineClass::Heading) => self.renderer.heading(&mut self.status, &text),
                Some(LineClass::Context(level)) => {
                    self.status.apply_context(level, text);
                    self.renderer.update_status(&mut self.status)
                }
                Some(LineClass::Regular) => self.renderer.commit(&mut self.status, &text),
            },
            // Always reaches the terminal as a preview, never classified.
            FrameEvent::PartialFlush(text) => self.renderer.partial_flush(&text),
            // Bypass line: classify(.., bypass = true) is unconditionally
            // `Regular`, so committing directly is equivalent and skips a
            // pointless match. `commit_bypass` (not `commit`) is required
            // here: an `Overwriting` primary already echoed every earlier
            // segment of `full` live via `partial_flush`, so only
            // `unflushed_tail` still needs printing (see
            // `Sink::commit_bypass`) — using plain `commit` would show the
            // already-previewed text a second time.
            FrameEvent::EndOfPartialRun { full, unflushed_tail } => {
                self.renderer.commit_bypass(&mut self.status, &full, &unflushed_tail)
            }
        }
    }

    /// End of input. Surfaces any trailing unterminated line (never
    /// silently dropped, per §3 Lifecycle) as a bypass `Regular` line, then
    /// erases the live status and flushes every sink. Routed directly
    /// (never back through `handle_frame_event`/the classifier, matching
    /// the "surfaced, not re-evaluated" rule for a trailing partial line).
    pub fn finish(mut self) -> Result<(), PteeError> {
        match self.accumulator.take_final_partial() {
            Some(FrameEvent::CompleteLine(text)) => {
                self.renderer.commit(&mut self.status, &text)?;
            }
            Some(FrameEvent::EndOfPartialRun { full, unflushed_tail }) => {
                self.renderer.commit_bypass(&mut self.status, &full, &unflushed_tail)?;
            }
            Some(FrameEvent::PartialFlush(_)) => {
                unreachable!("take_final_partial never produces PartialFlush")
            }
            None => {}
        }
        self.renderer.end_of_stream(&mut self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_render::{Mode, Sink};

    fn test_sink() -> Sink {
        Sink::new("test", Box::new(Vec::<u8>::new()), Mode::Plain { strip: true }, false)
    }

    fn pipeline(classifier: Classifier, timeout: Option<Duration>) -> Pipeline {
        Pipeline::new(Encoding::UTF8, timeout, classifier, Renderer::new(test_sink(), Vec::new()))
    }

    #[test]
    fn zero_timeout_means_no_timeout_configured() {
        let enabled = pipeline(Classifier::builder().build(), Some(Duration::from_secs(2)));
        assert!(enabled.timeout().is_some());
        let disabled = pipeline(Classifier::builder().build(), None);
        assert!(disabled.timeout().is_none());
    }

    #[test]
    fn trailing_unterminated_line_is_surfaced_at_finish() {
        let mut pipeline = pipeline(Classifier::builder().build(), Some(Duration::from_secs(2)));
        pipeline.ingest_bytes(b"no newline here").unwrap();
        pipeline.finish().unwrap();
    }

    #[test]
    fn timeout_with_nothing_buffered_is_a_noop() {
        let mut pipeline = pipeline(Classifier::builder().build(), Some(Duration::from_secs(2)));
        pipeline.handle_timeout().unwrap();
    }

    /// A trailing partial line that was already previewed (at least one
    /// timeout fired on it) must still finish through `finish()` without
    /// panicking on the `EndOfPartialRun` branch — `commit_bypass`, not
    /// plain `commit`, is the one that has to handle it.
    #[test]
    fn previewed_trailing_partial_is_surfaced_via_commit_bypass_at_finish() {
        let mut pipeline = pipeline(Classifier::builder().build(), Some(Duration::from_secs(2)));
        pipeline.ingest_bytes(b"Enter pw: ").unwrap();
        pipeline.handle_timeout().unwrap();
        pipeline.finish().unwrap();
    }
}
