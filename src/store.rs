//! Entry store: the data-access seam between the journal session and
//! wherever symptom entries actually live.
//!
//! The session only sees `dyn EntryStore`. `InMemoryEntryStore` is the
//! bundled implementation; it can be seeded with the demo history so the
//! page has something to show before a real backend is wired in.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::journal::ValidatedDraft;
use crate::models::SymptomEntry;

/// Patient the demo history belongs to.
pub const DEMO_PATIENT: &str = "John Doe";

const DEMO_HISTORY_JSON: &str = include_str!("../resources/demo_history.json");

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("Invalid seed data: {0}")]
    InvalidSeed(#[from] serde_json::Error),

    #[error("Entry rejected: {0}")]
    Rejected(String),
}

/// Source of prior entries and sink for new ones.
///
/// `patient` is whatever key the backend uses to identify a patient. The
/// session passes it through unchanged.
pub trait EntryStore: Send + Sync {
    /// Entries for one patient, newest first.
    fn list(&self, patient: &str) -> Result<Vec<SymptomEntry>, StoreError>;

    /// Persist a validated draft and return the stored entry.
    fn create(&self, patient: &str, draft: &ValidatedDraft) -> Result<SymptomEntry, StoreError>;
}

/// Process-local store backed by a `Vec`.
///
/// Patients are keyed by display name: `list` matches
/// [`SymptomEntry::patient_name`] exactly, and `create` records the key
/// there. Two patients sharing a name share a history.
pub struct InMemoryEntryStore {
    entries: RwLock<Vec<SymptomEntry>>,
    next_id: AtomicU64,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    pub fn with_entries(entries: Vec<SymptomEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            entries: RwLock::new(entries),
            next_id: AtomicU64::new(next_id),
        }
    }

    /// Seeds from a JSON array of entries (camelCase, ISO dates).
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let entries: Vec<SymptomEntry> = serde_json::from_str(json)?;
        Ok(Self::with_entries(entries))
    }

    /// The three sample entries for [`DEMO_PATIENT`].
    pub fn with_demo_history() -> Result<Self, StoreError> {
        Self::from_json(DEMO_HISTORY_JSON)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.entries.read().map_err(|_| StoreError::LockPoisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryStore for InMemoryEntryStore {
    fn list(&self, patient: &str) -> Result<Vec<SymptomEntry>, StoreError> {
        let guard = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut entries: Vec<SymptomEntry> = guard
            .iter()
            .filter(|e| e.patient_name == patient)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    fn create(&self, patient: &str, draft: &ValidatedDraft) -> Result<SymptomEntry, StoreError> {
        if patient.trim().is_empty() {
            return Err(StoreError::Rejected("Patient is required".into()));
        }

        let entry = SymptomEntry {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            symptom: draft.symptom.clone(),
            severity: i32::from(draft.severity),
            description: draft.description.clone(),
            triggers: draft.triggers.clone(),
            date: Self::today(),
            patient_name: patient.to_string(),
        };

        self.entries
            .write()
            .map_err(|_| StoreError::LockPoisoned)?
            .push(entry.clone());

        tracing::debug!(entry_id = entry.id, severity = entry.severity, "Symptom entry stored");
        Ok(entry)
    }
}
