use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system
///
/// Log lines go to stdout and to a daily-rotated file in the logs/ directory.
pub fn init_logging() -> Result<()> {
    std::fs::create_dir_all("logs")?;

    // File appender - daily rotation in logs/ folder
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "react_assistant.log");

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = fmt::layer().with_target(false);

    // Default to INFO level, can be overridden with RUST_LOG env var
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    tracing::info!("Logging system initialized");
    tracing::info!("Log files location: logs/react_assistant.log");

    Ok(())
}
