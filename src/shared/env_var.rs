//! Centralized reader for EXPLAIN_* environment variables.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const CONFIG_DIR: &str = "EXPLAIN_CONFIG_DIR";
const PROVIDER: &str = "EXPLAIN_PROVIDER";
const LOG: &str = "EXPLAIN_LOG";

/// Snapshot of all EXPLAIN_* environment variables at load time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvVars {
    /// Directory holding `config.yaml`, overriding the XDG location.
    pub config_dir: Option<String>,

    /// Provider name overriding the configured one for this run.
    pub provider: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all EXPLAIN_* environment variables from the current process.
    pub fn load() -> Self {
        Self {
            config_dir: non_empty_var(CONFIG_DIR),
            provider: non_empty_var(PROVIDER),
        }
    }

    /// Returns the env var name for PROVIDER (used in error messages).
    pub fn provider_name() -> &'static str {
        PROVIDER
    }

    /// Returns the env var name holding the tracing filter directives.
    pub fn log_name() -> &'static str {
        LOG
    }
}
