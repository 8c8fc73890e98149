//! Pipeline event plumbing (spec component E scaffolding): the message
//! type posted by the blocking stdin-reader thread, and the bounded
//! channel it travels over. The main pipeline thread is the sole
//! consumer; `recv_timeout` on that channel doubles as the partial-line
//! timeout source, so there is no separate timer thread.

use std::io;
use std::time::Duration;

pub use crossbeam_channel::{Receiver, RecvTimeoutError, SendError, Sender};

/// Backpressure cap on the reader→pipeline channel. The reader thread's
/// `send` blocks once this fills, which is the desired behavior: input is
/// never dropped, only throttled against a slow sink.
pub const CHANNEL_CAPACITY: usize = 256;

/// One message from the reader thread to the pipeline thread.
#[derive(Debug)]
pub enum PipelineEvent {
    /// Raw bytes read off stdin, not yet decoded.
    Chunk(Vec<u8>),
    /// Clean end of input.
    Eof,
    /// A read failed; the reader thread stops after sending this.
    ReadError(io::Error),
}

pub fn channel() -> (Sender<PipelineEvent>, Receiver<PipelineEvent>) {
    crossbeam_channel::bounded(CHANNEL_CAPACITY)
}

/// Wraps `Receiver::recv_timeout`, naming the two outcomes the pipeline
/// loop cares about: a real event, or nothing arriving before `timeout`
/// elapses (the partial-line timeout firing). `timeout == None` blocks
/// indefinitely, matching `T_partial = 0` (feature disabled).
pub fn recv(rx: &Receiver<PipelineEvent>, timeout: Option<Duration>) -> RecvOutcome {
    match timeout {
        None => match rx.recv() {
            Ok(event) => RecvOutcome::Event(event),
            Err(_) => RecvOutcome::Disconnected,
        },
        Some(timeout) => match rx.recv_timeout(timeout) {
            Ok(event) => RecvOutcome::Event(event),
            Err(RecvTimeoutError::Timeout) => RecvOutcome::TimedOut,
            Err(RecvTimeoutError::Disconnected) => RecvOutcome::Disconnected,
        },
    }
}

#[derive(Debug)]
pub enum RecvOutcome {
    Event(PipelineEvent),
    TimedOut,
    Disconnected,
}
