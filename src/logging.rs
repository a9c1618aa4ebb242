use tracing::{debug, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{PipelineError, Result};

/// Setup logging to stderr and, when configured, a daily-rotated file.
///
/// Stdout is left alone so translated or encoded text can be piped. The
/// returned guard flushes the file writer and must outlive `main`'s work.
pub fn setup_logging(
    app: &str,
    verbose: bool,
    config: &LoggingConfig,
) -> Result<Option<WorkerGuard>> {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .with_file(verbose)
        .with_line_number(verbose);

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = rolling::daily(dir, format!("{}.log", app));
            let (non_blocking_file, guard) = non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking_file)
                .with_target(false)
                .with_thread_ids(true)
                .with_thread_names(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| PipelineError::Config(format!("Failed to initialize logging: {}", e)))?;

    match &config.directory {
        Some(dir) => {
            let file = dir.join(format!("{}.log", app));
            info!("Logging initialized - level: {}, file: {}", log_level, file.display());
        }
        None => debug!("Logging initialized - level: {}", log_level),
    }

    Ok(guard)
}
