use std::env;

use tracing_subscriber::EnvFilter;

fn main() {
    // stdout is reserved for alert lines; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    std::process::exit(seat_stalker::cli::run_with_args(&args));
}
