use shared::config::LogFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Filter from `RUST_LOG`, falling back to info level
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging. Events go to stderr so stdout carries only the report.
pub fn init_logging(format: LogFormat) {
    match format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
                .json();

            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt_layer)
                .init();
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact();

            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt_layer)
                .init();
        }
    }

    tracing::debug!("Logging initialized ({:?})", format);
}
