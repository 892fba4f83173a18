use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber with a `warn` default.
///
/// `RUST_LOG` overrides the default. Output goes to stderr so stdout stays
/// free for command output.
pub fn init_logging() {
    init_logging_with_default("warn");
}

/// Initialise logging with an explicit default directive (e.g. `"debug"`).
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging_with_default(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
