//! Validation errors raised while turning parsed CLI [`Args`](crate::Args)
//! into a [`PipelineConfig`](crate::PipelineConfig). Reported to stderr
//! before any streaming begins; the process exits non-zero.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid regex `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("--level-regex requires a non-negative level, got `{0}`")]
    InvalidLevel(String),
    #[error("--skip-regex count must be >= 1, got {0}")]
    InvalidSkipCount(u32),
    #[error("--partial-line-timeout must be >= 0, got {0}")]
    NegativeTimeout(f64),
    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),
}
