#[cfg(feature = "trace")]
use std::path::Path;

#[cfg(feature = "trace")]
const DEFAULT_FILTER: &str = "ptm_core=debug,ptm_session=debug,ptm_cli=debug";

/// Keeps the file writer flushing until the command finishes.
#[cfg(feature = "trace")]
pub struct TraceGuard {
    _guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

#[cfg(not(feature = "trace"))]
pub struct TraceGuard;

/// Install the global subscriber. With `log_dir`, events go to
/// `ptmtool-trace.jsonl` there; otherwise to stderr. `RUST_LOG` overrides
/// the default filter.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: Option<&Path>) -> TraceGuard {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, "ptmtool-trace.jsonl");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_env_filter(filter)
                .init();
            TraceGuard {
                _guard: Some(guard),
            }
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
            TraceGuard { _guard: None }
        }
    }
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: Option<&std::path::Path>) -> TraceGuard {
    TraceGuard
}
