use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Arogya Sathi";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulated latency before a submitted draft reaches the entry store.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 2000;

/// How long the "Symptom logged" confirmation stays visible.
pub const DEFAULT_CONFIRMATION_MS: u64 = 3000;

const SUBMIT_DELAY_ENV: &str = "AROGYA_SUBMIT_DELAY_MS";
const CONFIRMATION_ENV: &str = "AROGYA_CONFIRMATION_MS";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,arogya_sathi_lib=debug"
}

/// Timings that drive the submission workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTiming {
    pub submit_delay: Duration,
    pub confirmation_display: Duration,
}

impl Default for SubmissionTiming {
    fn default() -> Self {
        Self {
            submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
            confirmation_display: Duration::from_millis(DEFAULT_CONFIRMATION_MS),
        }
    }
}

impl SubmissionTiming {
    /// Defaults, overridden by `AROGYA_SUBMIT_DELAY_MS` / `AROGYA_CONFIRMATION_MS`.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            submit_delay: parse_millis(SUBMIT_DELAY_ENV, lookup(SUBMIT_DELAY_ENV))
                .unwrap_or(defaults.submit_delay),
            confirmation_display: parse_millis(CONFIRMATION_ENV, lookup(CONFIRMATION_ENV))
                .unwrap_or(defaults.confirmation_display),
        }
    }
}

fn parse_millis(key: &str, raw: Option<String>) -> Option<Duration> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "Ignoring invalid timing override");
            None
        }
    }
}
