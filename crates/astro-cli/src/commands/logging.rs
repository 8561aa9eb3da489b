use anyhow::Result;
use astro_core::config::LoggingConfig;
use astro_infrastructure::AstroPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Installs the global subscriber: stderr plus, when enabled, a daily log
/// file under `logs/`. `RUST_LOG` takes precedence over the configured level.
///
/// The returned guard flushes the file writer on drop and must outlive the
/// program's logging.
pub fn init(config: &LoggingConfig, paths: &AstroPaths) -> Result<Option<WorkerGuard>> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter());

    if !config.file {
        tracing_subscriber::registry().with(stderr_layer).init();
        return Ok(None);
    }

    let logs_dir = paths.logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;
    let appender = tracing_appender::rolling::daily(&logs_dir, "astro.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(filter());

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    tracing::debug!(path = %logs_dir.display(), "file logging enabled");
    Ok(Some(guard))
}
