//! Rendering (spec component D): turns classifier events into bytes on the
//! primary sink (stdout, terminal or redirected) and zero or more
//! auxiliary file sinks, honoring each sink's own overwrite/strip mode.

pub mod error;
pub mod renderer;
pub mod sink;

pub use error::PteeError;
pub use renderer::Renderer;
pub use sink::{Mode, Sink};
