//! CLI parsing and config validation: turns `clap`-derived [`Args`] into a
//! validated [`PipelineConfig`], the single value threaded into the
//! pipeline. There is no on-disk config file — each invocation of `ptee`
//! is stateless.

pub mod args;
pub mod config;
pub mod error;

pub use args::Args;
pub use config::PipelineConfig;
pub use error::ConfigError;
