//! Logging init: human-readable output on stderr, so stdout only carries command results.

use tracing_subscriber::EnvFilter;

/// Sets up the global subscriber. `RUST_LOG` wins over `verbosity` (the number of `-v` flags).
pub fn init(verbosity: u8) {
    let default = match verbosity {
        0 => "warn,arxiv_notion=info",
        1 => "info,arxiv_notion=debug",
        _ => "debug,arxiv_notion=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
