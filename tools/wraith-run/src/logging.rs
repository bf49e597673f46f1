//! Diagnostic logging for the runner.
//!
//! Stdout carries the JSON event stream, so every log line goes to stderr.

use env_logger::{Builder, Env, Target};

/// Filter used when `RUST_LOG` is unset: `debug` under `--verbose`, else `info`.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the stderr logger. `RUST_LOG` overrides the `--verbose` choice.
/// Calling this twice keeps the first logger.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let _ = Builder::from_env(env)
        .target(Target::Stderr)
        .format_timestamp_millis()
        .try_init();
}
