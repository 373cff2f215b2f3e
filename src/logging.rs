use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter (`EnvFilter` syntax).
pub const LOG_ENV: &str = "AFFORD_LOG";

const DEFAULT_FILTER: &str = "zip_afford=info";

/// Initializes console logging on stderr so stdout stays free for reports.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
