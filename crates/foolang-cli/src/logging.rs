//! Logging setup for the CLI
//!
//! Tracing goes to stderr so it never mixes with command output. The filter
//! comes from `FOOLANG_LOG` when set, otherwise from the `-v` count.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber
///
/// Repeated initialization (e.g. in tests) is tolerated: only the first
/// call installs a subscriber.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let default_filter = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_env("FOOLANG_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .try_init();
}
