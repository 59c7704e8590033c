use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "astrocal=info";

/// Initializes the logging system with console output.
///
/// Logs `astrocal=info` unless `RUST_LOG` is set, in which case the
/// variable's directives replace the default entirely. The environment
/// controls verbosity only, never pipeline behavior.
pub fn init_logging() {
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with(console_layer)
        .init();
}

/// The effective filter: `RUST_LOG` verbatim when set, the default
/// directives otherwise.
fn env_filter(rust_log: Option<String>) -> EnvFilter {
    match rust_log {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(DEFAULT_DIRECTIVES),
    }
}
