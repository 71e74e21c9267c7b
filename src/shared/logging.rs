use tracing_subscriber::EnvFilter;

use super::env_var::EnvVars;

const DEFAULT_DIRECTIVES: &str = "warn";

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so they never mix with explanations printed on stdout.
/// Filter directives come from EXPLAIN_LOG (e.g. `EXPLAIN_LOG=debug`).
pub fn init() {
    let filter = EnvFilter::try_from_env(EnvVars::log_name())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
