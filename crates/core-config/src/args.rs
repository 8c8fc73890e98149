//! The CLI surface, declared with `clap`'s derive API.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ptee",
    version,
    about = "Classify and re-render a line-oriented stream with a live overwriting status line"
)]
pub struct Args {
    /// Duplicate the stream into these files, in addition to stdout.
    pub outfiles: Vec<PathBuf>,

    /// Level-0 context rule. Repeatable.
    #[arg(long = "regex", value_name = "PATTERN")]
    pub regex: Vec<String>,

    /// Context rule at an explicit level. Repeatable; takes two values.
    #[arg(long = "level-regex", value_names = ["LEVEL", "PATTERN"], num_args = 2)]
    pub level_regex: Vec<String>,

    /// Heading rule: printed as-is, never part of the status. Repeatable.
    #[arg(long = "heading-regex", value_name = "PATTERN")]
    pub heading_regex: Vec<String>,

    /// Skip rule: this line and COUNT-1 more are discarded. Repeatable;
    /// takes two values.
    #[arg(long = "skip-regex", value_names = ["COUNT", "PATTERN"], num_args = 2)]
    pub skip_regex: Vec<String>,

    /// Force strip mode on every sink, regardless of whether it's a terminal.
    #[arg(long, conflicts_with = "no_strip")]
    pub strip: bool,

    /// Force no-strip (always overwrite/pad) on every sink.
    #[arg(long)]
    pub no_strip: bool,

    /// Seconds to wait on an unterminated line before flushing it early.
    /// 0 disables the feature (wait indefinitely).
    #[arg(long = "partial-line-timeout", default_value_t = 2.0)]
    pub partial_line_timeout: f64,

    /// Input encoding; `utf-8` or any name `encoding_rs` recognizes.
    #[arg(long, default_value = "utf-8")]
    pub encoding: String,

    /// Attach a file writer for ptee's own diagnostic logging, independent
    /// of the OUTFILE sinks.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
