//! Sink kind detection: is a given stream an interactive terminal or a
//! redirected file/pipe.

use crossterm::tty::IsTty;

/// Whether a sink is an interactive terminal or a plain stream (file/pipe).
/// Overwrite (carriage-return) rendering only ever applies to `Terminal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Terminal,
    Stream,
}

impl SinkKind {
    pub fn of(stream: &impl IsTty) -> Self {
        if stream.is_tty() {
            SinkKind::Terminal
        } else {
            SinkKind::Stream
        }
    }
}

/// Policy controlling whether overwrite/strip semantics apply, independent
/// of what `SinkKind` detection would otherwise choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripPolicy {
    /// Strip iff the sink is not a terminal.
    #[default]
    Auto,
    AlwaysStrip,
    NeverStrip,
}

impl StripPolicy {
    /// Resolve to a final strip/no-strip decision for a concrete sink.
    pub fn resolve(self, kind: SinkKind) -> bool {
        match self {
            StripPolicy::Auto => kind == SinkKind::Stream,
            StripPolicy::AlwaysStrip => true,
            StripPolicy::NeverStrip => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_strips_only_streams() {
        assert!(!StripPolicy::Auto.resolve(SinkKind::Terminal));
        assert!(StripPolicy::Auto.resolve(SinkKind::Stream));
    }

    #[test]
    fn always_strip_overrides_terminal() {
        assert!(StripPolicy::AlwaysStrip.resolve(SinkKind::Terminal));
    }

    #[test]
    fn never_strip_overrides_stream() {
        assert!(!StripPolicy::NeverStrip.resolve(SinkKind::Stream));
    }
}
