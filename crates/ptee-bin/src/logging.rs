//! Diagnostic logging setup for `ptee` itself — independent of the stream
//! the tool is filtering. Defaults to stderr at `ptee=info`, controlled by
//! `RUST_LOG`; `--log-file PATH` additionally attaches a non-blocking file
//! writer so the program's own diagnostics don't interleave with its
//! stdout output.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ptee=info"))
}

/// Installs the global subscriber. The returned guard must be held for the
/// lifetime of the process when `log_file` is set — dropping it early
/// stops the background writer thread and truncates pending log lines.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    match log_file {
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
            Ok(None)
        }
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
            let file_name = path.file_name().ok_or_else(|| anyhow::anyhow!("--log-file must name a file"))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(writer)
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;
            Ok(Some(guard))
        }
    }
}
