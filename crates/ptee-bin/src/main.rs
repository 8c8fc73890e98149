//! `ptee` entrypoint: wires the reader thread, the timer, and the
//! [`pipeline::Pipeline`] together (spec component E) and owns process
//! lifecycle — exit codes, signal handling, and the config/logging
//! bootstrap that happens before any byte of input is touched.

use std::io::{self, Read};
use std::thread;
use std::time::Duration;

use clap::{CommandFactory, FromArgMatches};
use core_config::{Args, ConfigError, PipelineConfig};
use core_events::{PipelineEvent, RecvOutcome, channel, recv};
use core_terminal::ShutdownFlag;
use ptee::pipeline::Pipeline;
use ptee::sinks;

/// Chunk size for each blocking `read` on stdin. Arbitrary but generous
/// enough that ordinary line-oriented producers rarely split a line across
/// chunk boundaries; correctness does not depend on this value, only
/// throughput.
const READ_CHUNK_BYTES: usize = 64 * 1024;

/// How often the main loop polls when no partial-line timeout is
/// configured (`--partial-line-timeout 0`). Purely a responsiveness knob
/// for the shutdown flag; it never triggers [`Pipeline::handle_timeout`],
/// so it cannot produce a `PartialFlush` (invariant 6 in the spec).
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Conventional 128+SIGINT exit code used when a signal interrupts
/// streaming. The final status-clear still runs on this path — only the
/// exit code marks it as an abnormal termination rather than input EOF.
const SIGNAL_EXIT_CODE: i32 = 130;

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

fn run() -> i32 {
    // Parsed through `ArgMatches` rather than `Args::parse()` so
    // `PipelineConfig::from_args` can recover true CLI declaration order
    // between `--regex` and `--level-regex` via `ArgMatches::indices_of`.
    let matches = Args::command().get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };
    let config = match PipelineConfig::from_args(args, &matches) {
        Ok(config) => config,
        Err(err) => {
            report_config_error(&err);
            return 2;
        }
    };

    let _log_guard = match ptee::logging::init(config.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("ptee: {err}");
            return 2;
        }
    };

    tracing::info!(target: "pipeline", encoding = %config.encoding, outfiles = config.outfiles.len(), "startup");

    let shutdown = ShutdownFlag::new();
    if let Err(err) = shutdown.install() {
        tracing::warn!(target: "pipeline", error = %err, "failed to install signal handler, Ctrl-C will terminate abruptly");
    }

    let primary = sinks::primary(config.strip_policy);
    let auxiliaries = open_auxiliaries(&config.outfiles, config.strip_policy);
    let renderer = core_render::Renderer::new(primary, auxiliaries);

    let mut pipeline = Pipeline::new(config.encoding, config.partial_line_timeout, config.classifier, renderer);

    let (tx, rx) = channel();
    let reader = thread::spawn(move || read_stdin_into(tx));

    let recv_timeout = Some(pipeline.timeout().unwrap_or(SHUTDOWN_POLL_INTERVAL));

    let exit_code = 'streaming: loop {
        if shutdown.is_set() {
            tracing::warn!(target: "pipeline", "shutdown signal observed, draining");
            break 'streaming SIGNAL_EXIT_CODE;
        }

        match recv(&rx, recv_timeout) {
            RecvOutcome::TimedOut => {
                // A no-op when the timeout feature is disabled — see
                // `Pipeline::handle_timeout`; here it's also just our
                // shutdown-flag poll tick firing.
                if let Err(err) = pipeline.handle_timeout() {
                    report_primary_error(&err);
                    break 'streaming 1;
                }
            }
            RecvOutcome::Event(PipelineEvent::Chunk(bytes)) => {
                if let Err(err) = pipeline.ingest_bytes(&bytes) {
                    report_primary_error(&err);
                    break 'streaming 1;
                }
            }
            RecvOutcome::Event(PipelineEvent::Eof) => break 'streaming 0,
            RecvOutcome::Event(PipelineEvent::ReadError(err)) => {
                tracing::warn!(target: "pipeline", error = %err, "input read failed, treating as end of stream");
                break 'streaming 0;
            }
            RecvOutcome::Disconnected => break 'streaming 0,
        }
    };

    let final_code = match pipeline.finish() {
        Ok(()) => exit_code,
        Err(err) => {
            report_primary_error(&err);
            exit_code.max(1)
        }
    };

    // The reader thread blocks on stdin reads that may never return once
    // we've decided to stop (e.g. a signal mid-read); it is not joined.
    // Dropping its handle just detaches it — the process exits regardless.
    drop(reader);

    final_code
}

/// Open every `OUTFILE` as an auxiliary sink. A file that fails to open is
/// logged and simply omitted from the fan-out, matching how a write
/// failure on an already-open auxiliary sink is handled (§7
/// `AuxiliarySinkError`): the pipeline keeps going without it.
fn open_auxiliaries(outfiles: &[std::path::PathBuf], strip_policy: core_terminal::StripPolicy) -> Vec<core_render::Sink> {
    outfiles
        .iter()
        .filter_map(|path| match sinks::auxiliary(path, strip_policy) {
            Ok(sink) => Some(sink),
            Err(err) => {
                tracing::error!(target: "pipeline", path = %path.display(), error = %err, "failed to open auxiliary sink, omitting it");
                None
            }
        })
        .collect()
}

/// Blocking reader loop run on its own thread: posts raw chunks to `tx`
/// until EOF or a read error, then stops. Never touches the pipeline
/// directly — the channel is the only thing it shares with the main
/// thread, per the spec's single-serialized-queue concurrency model.
fn read_stdin_into(tx: core_events::Sender<PipelineEvent>) {
    let mut stdin = io::stdin();
    let mut buf = vec![0u8; READ_CHUNK_BYTES];
    loop {
        match stdin.read(&mut buf) {
            Ok(0) => {
                let _ = tx.send(PipelineEvent::Eof);
                return;
            }
            Ok(n) => {
                if tx.send(PipelineEvent::Chunk(buf[..n].to_vec())).is_err() {
                    return;
                }
            }
            Err(err) => {
                let _ = tx.send(PipelineEvent::ReadError(err));
                return;
            }
        }
    }
}

fn report_config_error(err: &ConfigError) {
    eprintln!("ptee: {err}");
}

fn report_primary_error(err: &core_render::PteeError) {
    eprintln!("ptee: {err}");
}
