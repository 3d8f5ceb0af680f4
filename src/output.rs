//! Console verbosity for the human-facing status lines in [`crate::ui`]
//!
//! Diagnostics go through `tracing` on stderr and are not affected.

use std::sync::OnceLock;

/// Environment switch read when no `--quiet` flag was given
pub const QUIET_ENV: &str = "RULESYNC_QUIET";

static VERBOSITY: OnceLock<Verbosity> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Status lines suppressed; warnings and errors still reach stderr
    Quiet,
    Normal,
}

impl Verbosity {
    /// `--quiet` wins, otherwise the value of `RULESYNC_QUIET` decides
    pub fn resolve(quiet_flag: bool, env_value: Option<&str>) -> Self {
        if quiet_flag || env_value.is_some_and(is_truthy) {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    fn from_env() -> Self {
        Self::resolve(false, std::env::var(QUIET_ENV).ok().as_deref())
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Fix the verbosity for the rest of the process. Only the first call counts.
pub fn set_verbosity(verbosity: Verbosity) {
    if VERBOSITY.set(verbosity).is_err() {
        tracing::debug!("Verbosity already set, ignoring {:?}", verbosity);
    }
}

pub fn verbosity() -> Verbosity {
    *VERBOSITY.get_or_init(Verbosity::from_env)
}

pub fn is_quiet() -> bool {
    verbosity() == Verbosity::Quiet
}
