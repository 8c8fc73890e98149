//! Fan-out rendering: one classifier-driven event is written to the
//! primary sink and every surviving auxiliary sink.

use core_state::StatusState;

use crate::error::PteeError;
use crate::sink::Sink;

pub struct Renderer {
    primary: Sink,
    auxiliaries: Vec<Sink>,
}

impl Renderer {
    pub fn new(primary: Sink, auxiliaries: Vec<Sink>) -> Self {
        Self { primary, auxiliaries }
    }

    fn fan_out(&mut self, mut f: impl FnMut(&mut Sink) -> std::io::Result<()>) {
        self.auxiliaries.retain_mut(|sink| match f(sink) {
            Ok(()) => true,
            Err(source) => {
                tracing::error!(
                    target: "render",
                    sink = sink.label(),
                    error = %source,
                    "auxiliary sink failed, dropping from fan-out"
                );
                false
            }
        });
    }

    /// Redraw the live status after a `Context` event.
    pub fn update_status(&mut self, status: &mut StatusState) -> Result<(), PteeError> {
        let composed = status.composed();
        let term_width = core_terminal::terminal_width();
        self.primary
            .update_status(&composed, term_width)
            .map_err(PteeError::PrimarySink)?;
        status.set_last_rendered_width(self.primary.last_rendered_width());
        self.fan_out(|s| s.update_status(&composed, None));
        Ok(())
    }

    /// A `Heading` line: clear the live status, print it, redraw the status
    /// underneath.
    pub fn heading(&mut self, status: &mut StatusState, text: &str) -> Result<(), PteeError> {
        let composed = status.composed();
        let term_width = core_terminal::terminal_width();
        self.primary
            .heading(text, &composed, term_width)
            .map_err(PteeError::PrimarySink)?;
        status.set_last_rendered_width(self.primary.last_rendered_width());
        self.fan_out(|s| s.heading(text, &composed, None));
        Ok(())
    }

    /// A `Regular` line: commit the current status as permanent output —
    /// one line per level, ascending (§4.3 testable property 4), distinct
    /// from the two-space-joined single row used for the live status —
    /// then print the line itself.
    pub fn commit(&mut self, status: &mut StatusState, line: &str) -> Result<(), PteeError> {
        let block = status.committed_block();
        self.primary.commit(&block, line).map_err(PteeError::PrimarySink)?;
        status.set_last_rendered_width(0);
        self.fan_out(|s| s.commit(&block, line));
        Ok(())
    }

    /// A bypass line (`EndOfPartialRun`, §4.1): still promotes any live
    /// context to permanent output, but — unlike `commit` — must not
    /// re-print text an `Overwriting` primary already echoed live via
    /// `partial_flush`. `unflushed_tail` is the only part of `full_line`
    /// that sink hasn't already shown (see [`Sink::commit_bypass`]).
    pub fn commit_bypass(
        &mut self,
        status: &mut StatusState,
        full_line: &str,
        unflushed_tail: &str,
    ) -> Result<(), PteeError> {
        let block = status.committed_block();
        self.primary
            .commit_bypass(&block, full_line, unflushed_tail)
            .map_err(PteeError::PrimarySink)?;
        status.set_last_rendered_width(0);
        self.fan_out(|s| s.commit_bypass(&block, full_line, unflushed_tail));
        Ok(())
    }

    /// Live preview of an unterminated line, triggered by the partial-line
    /// timeout. Only ever visible on the primary sink when it's a terminal.
    pub fn partial_flush(&mut self, text: &str) -> Result<(), PteeError> {
        self.primary.write_partial(text).map_err(PteeError::PrimarySink)
    }

    /// End of stream: erase any live status and flush every sink.
    pub fn end_of_stream(&mut self, status: &mut StatusState) -> Result<(), PteeError> {
        self.primary.clear_status().map_err(PteeError::PrimarySink)?;
        self.primary.flush().map_err(PteeError::PrimarySink)?;
        status.set_last_rendered_width(0);
        self.fan_out(|s| {
            s.clear_status()?;
            s.flush()
        });
        Ok(())
    }
}
