use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the non-blocking file writer alive; dropping it flushes the log.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Install the global subscriber: stdout always, plus a daily-rolling file
/// layer when `log_dir` is set.
pub fn init_tracing(log_level: &str, log_dir: Option<&str>) -> Option<LogGuard> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(true);

    if let Some(dir) = log_dir {
        match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = RollingFileAppender::new(Rotation::DAILY, dir, "wordbox.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file_layer = fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(stdout_layer)
                    .with(file_layer)
                    .init();

                return Some(LogGuard { _guard: guard });
            }
            Err(err) => eprintln!("failed to create log directory {dir}: {err}"),
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .init();

    None
}
