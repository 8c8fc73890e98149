//! Turns a parsed [`Args`] into a validated [`PipelineConfig`] — the single
//! value threaded into the pipeline; there is no ambient global config.

use std::path::PathBuf;
use std::time::Duration;

use core_model::Classifier;
use core_terminal::StripPolicy;
use core_text::Encoding;
use regex::Regex;

use crate::args::Args;
use crate::error::ConfigError;

pub struct PipelineConfig {
    pub classifier: Classifier,
    pub encoding: Encoding,
    pub partial_line_timeout: Option<Duration>,
    pub strip_policy: StripPolicy,
    pub outfiles: Vec<PathBuf>,
    pub log_file: Option<PathBuf>,
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}

/// Merge the bare `--regex` (level-0 sugar) and `--level-regex LEVEL
/// PATTERN` occurrences back into a single list in true CLI declaration
/// order. `clap` collects each repeatable flag into its own `Vec` in
/// encounter order, but draining `args.regex` before `args.level_regex`
/// (or vice versa) loses the *relative* order between the two flag kinds
/// — §4.2 step 4 requires level-context rules evaluated in declaration
/// order, first-match-wins, regardless of which of the two spellings
/// produced them. `ArgMatches::indices_of` reports each value's position
/// in argv, which is enough to recover that order without needing a
/// custom clap value parser.
fn ordered_level_rules(args: &Args, matches: &clap::ArgMatches) -> Result<Vec<(u32, String)>, ConfigError> {
    let mut tagged: Vec<(usize, u32, String)> = Vec::new();

    if let Some(indices) = matches.indices_of("regex") {
        for (index, pattern) in indices.zip(args.regex.iter()) {
            tagged.push((index, 0, pattern.clone()));
        }
    }

    if let Some(indices) = matches.indices_of("level_regex") {
        // `num_args = 2`: indices come in (LEVEL, PATTERN) pairs per
        // occurrence; the first of each pair anchors that occurrence's
        // position for ordering purposes.
        let anchors = indices.step_by(2);
        for (index, level_pattern) in anchors.zip(args.level_regex.chunks_exact(2)) {
            let [level, pattern] = level_pattern else {
                unreachable!("chunks_exact(2) always yields pairs")
            };
            let level: u32 = level
                .parse()
                .map_err(|_| ConfigError::InvalidLevel(level.clone()))?;
            tagged.push((index, level, pattern.clone()));
        }
    }

    tagged.sort_by_key(|&(index, _, _)| index);
    Ok(tagged.into_iter().map(|(_, level, pattern)| (level, pattern)).collect())
}

impl PipelineConfig {
    pub fn from_args(args: Args, matches: &clap::ArgMatches) -> Result<Self, ConfigError> {
        let mut builder = Classifier::builder();

        for count_pattern in args.skip_regex.chunks_exact(2) {
            let [count, pattern] = count_pattern else {
                unreachable!("chunks_exact(2) always yields pairs")
            };
            let count: u32 = count.parse().unwrap_or(0);
            if count == 0 {
                return Err(ConfigError::InvalidSkipCount(count));
            }
            builder.add_skip_rule(count, compile(pattern)?);
        }

        for pattern in &args.heading_regex {
            builder.add_heading_rule(compile(pattern)?);
        }

        for (level, pattern) in ordered_level_rules(&args, matches)? {
            builder.add_level_rule(level, compile(&pattern)?);
        }

        if args.partial_line_timeout < 0.0 {
            return Err(ConfigError::NegativeTimeout(args.partial_line_timeout));
        }
        let partial_line_timeout = if args.partial_line_timeout == 0.0 {
            None
        } else {
            Some(Duration::from_secs_f64(args.partial_line_timeout))
        };

        let encoding = Encoding::from_label(&args.encoding)
            .map_err(|_| ConfigError::UnknownEncoding(args.encoding.clone()))?;

        let strip_policy = if args.strip {
            StripPolicy::AlwaysStrip
        } else if args.no_strip {
            StripPolicy::NeverStrip
        } else {
            StripPolicy::Auto
        };

        Ok(PipelineConfig {
            classifier: builder.build(),
            encoding,
            partial_line_timeout,
            strip_policy,
            outfiles: args.outfiles,
            log_file: args.log_file,
        })
    }
}
