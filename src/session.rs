//! Journal session: transient state for one open symptom page.
//!
//! Owns the draft, the AI-help toggle and the submission status for a single
//! patient. Prior entries come from the injected [`EntryStore`]; nothing is
//! cached here. Dropping or abandoning the session discards the draft.

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::SubmissionTiming;
use crate::journal::{
    history_items, summarize_insights, validate_draft, HealthInsights, HistoryItem,
    ValidatedDraft, ValidationErrors, AI_HELP_NOTICE,
};
use crate::models::{DraftField, InvalidEnum, SymptomDraft};
use crate::store::{EntryStore, StoreError};
use crate::submission::{spawn_submission, SessionState, SubmissionHandle, SubmissionStatus};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("Session lock poisoned")]
    LockPoisoned,

    #[error("Entry store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unknown draft field: {0}")]
    UnknownField(#[from] InvalidEnum),
}

pub struct JournalSession {
    patient: String,
    store: Arc<dyn EntryStore>,
    timing: SubmissionTiming,
    state: Arc<Mutex<SessionState>>,
}

impl JournalSession {
    /// Start a session with an empty draft.
    pub fn new(
        patient: impl Into<String>,
        store: Arc<dyn EntryStore>,
        timing: SubmissionTiming,
    ) -> Self {
        let patient = patient.into();
        tracing::debug!(patient = %patient, "Journal session opened");
        Self {
            patient,
            store,
            timing,
            state: Arc::new(Mutex::new(SessionState::new())),
        }
    }

    pub fn patient(&self) -> &str {
        &self.patient
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionState>, SessionError> {
        self.state.lock().map_err(|_| SessionError::LockPoisoned)
    }

    // ── Draft ───────────────────────────────

    /// Snapshot of the current draft.
    pub fn draft(&self) -> Result<SymptomDraft, SessionError> {
        Ok(self.lock()?.draft.clone())
    }

    pub fn set_field(&self, field: DraftField, value: impl Into<String>) -> Result<(), SessionError> {
        self.lock()?.draft.set(field, value);
        Ok(())
    }

    /// Same as [`set_field`](Self::set_field), addressed by the form's field name.
    pub fn set_field_by_name(&self, name: &str, value: impl Into<String>) -> Result<(), SessionError> {
        let field = DraftField::from_str(name)?;
        self.set_field(field, value)
    }

    /// Check the draft against the required-field policy without submitting.
    pub fn validate(&self) -> Result<ValidatedDraft, SessionError> {
        Ok(validate_draft(&self.lock()?.draft)?)
    }

    // ── Status ──────────────────────────────

    pub fn status(&self) -> Result<SubmissionStatus, SessionError> {
        Ok(self.lock()?.status.clone())
    }

    pub fn is_submitting(&self) -> Result<bool, SessionError> {
        Ok(self.lock()?.status == SubmissionStatus::Submitting)
    }

    /// The "Symptom logged" message while it is on screen.
    pub fn confirmation(&self) -> Result<Option<String>, SessionError> {
        Ok(self.lock()?.confirmation.clone())
    }

    // ── AI help ─────────────────────────────

    /// Flip the AI-help panel; returns whether it is now open.
    pub fn toggle_ai_help(&self) -> Result<bool, SessionError> {
        let mut state = self.lock()?;
        state.ai_help_open = !state.ai_help_open;
        Ok(state.ai_help_open)
    }

    pub fn ai_help_notice(&self) -> Result<Option<&'static str>, SessionError> {
        Ok(self.lock()?.ai_help_open.then_some(AI_HELP_NOTICE))
    }

    // ── History ─────────────────────────────

    pub fn history(&self) -> Result<Vec<HistoryItem>, SessionError> {
        let entries = self.store.list(&self.patient)?;
        Ok(history_items(entries))
    }

    pub fn insights(&self, today: NaiveDate) -> Result<HealthInsights, SessionError> {
        let entries = self.store.list(&self.patient)?;
        Ok(summarize_insights(&entries, today))
    }

    // ── Submission ──────────────────────────

    /// Validate the draft and start a submission.
    ///
    /// Must be called from within a tokio runtime. Field errors are returned
    /// before anything changes; a second call while one is in flight is
    /// rejected.
    pub fn submit(&self) -> Result<SubmissionHandle, SessionError> {
        let (id, draft, cancel_rx) = {
            let mut state = self.lock()?;
            if state.status == SubmissionStatus::Submitting {
                return Err(SessionError::AlreadySubmitting);
            }
            let draft = validate_draft(&state.draft)?;
            let (id, cancel_rx) = state.begin_submission();
            (id, draft, cancel_rx)
        };

        tracing::info!(
            submission = id,
            patient = %self.patient,
            severity = draft.severity,
            "Submitting symptom draft"
        );

        Ok(spawn_submission(
            id,
            self.state.clone(),
            self.store.clone(),
            self.patient.clone(),
            draft,
            self.timing,
            cancel_rx,
        ))
    }

    /// Navigation away: cancel any pending submission and discard the draft.
    /// Returns `true` if a submission was abandoned.
    pub fn abandon(&self) -> Result<bool, SessionError> {
        let mut state = self.lock()?;
        let cancelled = state.cancel_pending();
        state.status = SubmissionStatus::Idle;
        state.draft.clear();
        state.confirmation = None;
        state.ai_help_open = false;
        if cancelled {
            tracing::info!(patient = %self.patient, "Pending submission abandoned");
        }
        Ok(cancelled)
    }
}
