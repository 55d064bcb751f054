#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Install a global subscriber filtered by `RUST_LOG` (default
/// `migemo=debug`). With `log_dir`, events go to `migemo-trace.jsonl` there;
/// otherwise to stderr.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: Option<&Path>) {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("migemo=debug"));

        match log_dir {
            Some(dir) => {
                let file_appender = tracing_appender::rolling::never(dir, "migemo-trace.jsonl");
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                std::mem::forget(guard); // flushed for the life of the process

                tracing_subscriber::fmt()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
                    .with_env_filter(filter)
                    .init();
            }
            None => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_env_filter(filter)
                    .init();
            }
        }
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: Option<&std::path::Path>) {}
