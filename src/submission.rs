//! Submission workflow: the hand-off from a completed draft to the entry
//! store.
//!
//! A submission runs as its own tokio task: it waits out the configured
//! submit delay, calls `EntryStore::create`, and on success shows the
//! confirmation for the configured display duration. Until the delay has
//! elapsed the task can be cancelled through its [`SubmissionHandle`], in
//! which case the store is never called.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::SubmissionTiming;
use crate::journal::{ValidatedDraft, CONFIRMATION_MESSAGE};
use crate::models::{SymptomDraft, SymptomEntry};
use crate::store::EntryStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Succeeded { entry_id: u64 },
    /// The draft was kept; submitting again retries.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Logged(SymptomEntry),
    Failed(String),
    Cancelled,
}

/// Mutable page state shared between the session and its submission tasks.
#[derive(Debug)]
pub(crate) struct SessionState {
    pub draft: SymptomDraft,
    pub status: SubmissionStatus,
    pub confirmation: Option<String>,
    /// Bumped for every confirmation so a stale clear timer leaves a newer one alone.
    pub confirmation_generation: u64,
    pub ai_help_open: bool,
    pub pending: Option<PendingSubmission>,
    next_submission_id: u64,
}

/// Cancel side of the one submission that has not reached the store yet.
#[derive(Debug)]
pub(crate) struct PendingSubmission {
    pub id: u64,
    pub cancel: oneshot::Sender<()>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            draft: SymptomDraft::new(),
            status: SubmissionStatus::Idle,
            confirmation: None,
            confirmation_generation: 0,
            ai_help_open: false,
            pending: None,
            next_submission_id: 1,
        }
    }

    /// Move to `Submitting` under a fresh submission id.
    pub fn begin_submission(&mut self) -> (u64, oneshot::Receiver<()>) {
        let id = self.next_submission_id;
        self.next_submission_id += 1;
        let (cancel, cancel_rx) = oneshot::channel();
        self.pending = Some(PendingSubmission { id, cancel });
        self.status = SubmissionStatus::Submitting;
        (id, cancel_rx)
    }

    /// Abandon whatever submission is in flight. Returns `true` if one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                let _ = pending.cancel.send(());
                self.status = SubmissionStatus::Idle;
                true
            }
            None => false,
        }
    }

    /// Abandon submission `id` only; a later submission is left alone.
    pub fn cancel_submission(&mut self, id: u64) -> bool {
        self.is_pending(id) && self.cancel_pending()
    }

    /// Claim submission `id` for the store call. `false` if it was cancelled.
    fn commit_submission(&mut self, id: u64) -> bool {
        if !self.is_pending(id) {
            return false;
        }
        self.pending = None;
        true
    }

    fn is_pending(&self, id: u64) -> bool {
        self.pending.as_ref().is_some_and(|p| p.id == id)
    }
}

pub(crate) type SharedState = Arc<Mutex<SessionState>>;

fn lock_state(state: &SharedState) -> Option<MutexGuard<'_, SessionState>> {
    match state.lock() {
        Ok(guard) => Some(guard),
        Err(_) => {
            tracing::error!("Session state lock poisoned");
            None
        }
    }
}

/// Handle to one in-flight submission.
///
/// Dropping the handle does not cancel; the submission keeps running.
pub struct SubmissionHandle {
    id: u64,
    task: JoinHandle<SubmissionOutcome>,
    state: SharedState,
}

impl SubmissionHandle {
    /// Abandon this submission if the store has not been called yet.
    /// Never touches a later submission on the same session.
    pub fn cancel(&self) -> bool {
        match lock_state(&self.state) {
            Some(mut state) => state.cancel_submission(self.id),
            None => false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the store's answer (or cancellation).
    pub async fn wait(self) -> SubmissionOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => SubmissionOutcome::Failed(format!("Submission task failed: {e}")),
        }
    }
}

/// Spawn the submission task. The caller has already called
/// [`SessionState::begin_submission`], which produced `id` and `cancel_rx`.
pub(crate) fn spawn_submission(
    id: u64,
    state: SharedState,
    store: Arc<dyn EntryStore>,
    patient: String,
    draft: ValidatedDraft,
    timing: SubmissionTiming,
    cancel_rx: oneshot::Receiver<()>,
) -> SubmissionHandle {
    let task = tokio::spawn(run_submission(
        id,
        state.clone(),
        store,
        patient,
        draft,
        timing,
        cancel_rx,
    ));
    SubmissionHandle { id, task, state }
}

async fn run_submission(
    id: u64,
    state: SharedState,
    store: Arc<dyn EntryStore>,
    patient: String,
    draft: ValidatedDraft,
    timing: SubmissionTiming,
    cancel_rx: oneshot::Receiver<()>,
) -> SubmissionOutcome {
    tokio::select! {
        _ = tokio::time::sleep(timing.submit_delay) => {}
        _ = cancel_rx => {
            tracing::info!(submission = id, patient = %patient, "Submission abandoned before reaching the store");
            return SubmissionOutcome::Cancelled;
        }
    }

    // Past this point the submission can no longer be cancelled.
    {
        let Some(mut guard) = lock_state(&state) else {
            return SubmissionOutcome::Failed("Session state unavailable".into());
        };
        if !guard.commit_submission(id) {
            return SubmissionOutcome::Cancelled;
        }
    }

    let result = store.create(&patient, &draft);

    let Some(mut guard) = lock_state(&state) else {
        return SubmissionOutcome::Failed("Session state unavailable".into());
    };

    match result {
        Ok(entry) => {
            guard.status = SubmissionStatus::Succeeded { entry_id: entry.id };
            guard.draft.clear();
            guard.confirmation = Some(CONFIRMATION_MESSAGE.to_string());
            guard.confirmation_generation += 1;
            let generation = guard.confirmation_generation;
            drop(guard);

            tracing::info!(entry_id = entry.id, severity = entry.severity, "Symptom logged");
            tokio::spawn(clear_confirmation(state, generation, timing));
            SubmissionOutcome::Logged(entry)
        }
        Err(e) => {
            let message = e.to_string();
            guard.status = SubmissionStatus::Failed {
                message: message.clone(),
            };
            drop(guard);

            tracing::warn!(error = %message, "Symptom submission failed; draft kept for retry");
            SubmissionOutcome::Failed(message)
        }
    }
}

async fn clear_confirmation(state: SharedState, generation: u64, timing: SubmissionTiming) {
    tokio::time::sleep(timing.confirmation_display).await;

    let Some(mut guard) = lock_state(&state) else {
        return;
    };
    if guard.confirmation_generation != generation {
        return;
    }
    guard.confirmation = None;
    if matches!(guard.status, SubmissionStatus::Succeeded { .. }) {
        guard.status = SubmissionStatus::Idle;
    }
    tracing::debug!(generation, "Confirmation cleared");
}
