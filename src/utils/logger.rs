use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Console logging for the CLI. `RUST_LOG` wins when set; `--verbose`
/// lifts the default level to debug.
pub fn init_cli_logger(verbose: bool) {
    let default_filter = if verbose {
        "photoland=debug,info"
    } else {
        "photoland=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
