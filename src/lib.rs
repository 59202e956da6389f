pub mod config;
pub mod models;
pub mod severity; // Severity tiers and display lookup
pub mod journal; // Symptom picker, draft validation, history, insights
pub mod store; // Entry store seam + in-memory implementation
pub mod submission; // Cancellable submission task
pub mod session; // Per-page journal session

pub use journal::{HealthInsights, HistoryItem, ValidatedDraft, ValidationErrors};
pub use models::{DraftField, SeverityTier, SymptomDraft, SymptomEntry};
pub use session::{JournalSession, SessionError};
pub use severity::{classify, SeverityDisplay};
pub use store::{EntryStore, InMemoryEntryStore, StoreError};
pub use submission::{SubmissionHandle, SubmissionOutcome, SubmissionStatus};

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber for host applications.
///
/// Honors `RUST_LOG`, falling back to [`config::default_log_filter`]. Safe to
/// call more than once; later calls are ignored.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}
