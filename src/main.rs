//! CACT front end CLI entry point

fn main() {
    // Structured logging to stderr with an env-based filter, defaulting to warn,
    // so stdout stays clean for token/AST dumps.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    cactc::cli::run();
}
