//! Library half of the `ptee` package: everything `main` wires together,
//! pulled out so integration tests can drive [`pipeline::Pipeline`]
//! directly with an in-memory writer instead of spawning the binary.

pub mod logging;
pub mod pipeline;
pub mod sinks;
