use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging on stderr.
///
/// `RUST_LOG` wins when set; otherwise the crate logs at info, or debug when
/// `verbose` is on.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "fars_explorer=debug"
    } else {
        "fars_explorer=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    // Ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
