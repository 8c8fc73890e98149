//! Opens the primary stdout sink and the auxiliary `OUTFILE` sinks,
//! resolving each one's overwrite/strip mode independently.

use std::fs::File;
use std::io;
use std::path::Path;

use core_render::{Mode, Sink};
use core_terminal::{SinkKind, StripPolicy};

fn resolve_mode(kind: SinkKind, strip_policy: StripPolicy) -> Mode {
    let strip = strip_policy.resolve(kind);
    match kind {
        SinkKind::Terminal if !strip => Mode::Overwriting,
        _ => Mode::Plain { strip },
    }
}

pub fn primary(strip_policy: StripPolicy) -> Sink {
    let kind = SinkKind::of(&io::stdout());
    let mode = resolve_mode(kind, strip_policy);
    Sink::new("stdout", Box::new(io::stdout()), mode, true)
}

pub fn auxiliary(path: &Path, strip_policy: StripPolicy) -> io::Result<Sink> {
    let file = File::create(path)?;
    let mode = resolve_mode(SinkKind::Stream, strip_policy);
    Ok(Sink::new(path.display().to_string(), Box::new(file), mode, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_kind_is_always_plain() {
        assert_eq!(
            resolve_mode(SinkKind::Stream, StripPolicy::NeverStrip),
            Mode::Plain { strip: false }
        );
    }

    #[test]
    fn terminal_forced_strip_is_plain_not_overwriting() {
        assert_eq!(
            resolve_mode(SinkKind::Terminal, StripPolicy::AlwaysStrip),
            Mode::Plain { strip: true }
        );
    }

    #[test]
    fn terminal_default_is_overwriting() {
        assert_eq!(resolve_mode(SinkKind::Terminal, StripPolicy::Auto), Mode::Overwriting);
    }
}
