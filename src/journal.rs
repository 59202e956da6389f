//! Symptom journal: picker data, draft validation, history view items and
//! health insights.
//!
//! Everything here is pure: it operates on drafts and entries handed in by
//! the session and never touches the entry store directly.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DraftField, SymptomDraft, SymptomEntry};
use crate::severity::{classify, severity_percent, SeverityDisplay, SEVERITY_MAX, SEVERITY_MIN};

// ═══════════════════════════════════════════
// Constants: picker entries and fixed copy
// ═══════════════════════════════════════════

pub const OTHER_SYMPTOM: &str = "Other";

pub const COMMON_SYMPTOMS: &[&str] = &[
    "Headache",
    "Fatigue",
    "Nausea",
    "Dizziness",
    "Chest Pain",
    "Shortness of Breath",
    "Joint Pain",
    "Back Pain",
    "Stomach Pain",
    OTHER_SYMPTOM,
];

pub const CONFIRMATION_MESSAGE: &str = "Symptom logged";

pub const AI_HELP_NOTICE: &str = "AI-guided symptom assessment will be available in the next update. \
For now, please use the form above to log your symptoms.";

pub const EMPTY_HISTORY_TITLE: &str = "No symptoms logged yet";
pub const EMPTY_HISTORY_MESSAGE: &str = "Start tracking your symptoms to monitor your health";

pub const MEDICAL_DISCLAIMER: &str = "Always seek professional advice before diagnosing disease on your own. \
This symptom tracker is for monitoring purposes only and should not replace professional medical consultation.";

/// Window for the "This Week" insight, including today.
const INSIGHT_WINDOW_DAYS: i64 = 7;

// ═══════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════

/// A draft that passed the required-field policy, ready for the entry store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedDraft {
    /// Resolved name: the custom text when "Other" was picked.
    pub symptom: String,
    pub severity: u8,
    pub description: Option<String>,
    pub triggers: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Draft is incomplete: {}", summarize(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn for_field(&self, field: DraftField) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn fields(&self) -> Vec<DraftField> {
        self.0.iter().map(|e| e.field).collect()
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Applies the required-field policy. All failing fields are reported at once.
pub fn validate_draft(draft: &SymptomDraft) -> Result<ValidatedDraft, ValidationErrors> {
    let mut errors = Vec::new();

    let picked = draft.symptom.trim();
    let symptom = if picked.is_empty() {
        errors.push(FieldError {
            field: DraftField::Symptom,
            message: "Please select a symptom".into(),
        });
        None
    } else if picked == OTHER_SYMPTOM {
        let custom = non_blank(&draft.custom_symptom);
        if custom.is_none() {
            errors.push(FieldError {
                field: DraftField::CustomSymptom,
                message: "Please describe your symptom".into(),
            });
        }
        custom
    } else {
        Some(picked.to_string())
    };

    let severity = match draft.severity.trim() {
        "" => {
            errors.push(FieldError {
                field: DraftField::Severity,
                message: "Please rate your symptom severity".into(),
            });
            None
        }
        raw => match raw.parse::<i32>() {
            Ok(s) if (SEVERITY_MIN..=SEVERITY_MAX).contains(&s) => Some(s as u8),
            _ => {
                errors.push(FieldError {
                    field: DraftField::Severity,
                    message: format!("Severity must be between {SEVERITY_MIN} and {SEVERITY_MAX}"),
                });
                None
            }
        },
    };

    match (symptom, severity) {
        (Some(symptom), Some(severity)) if errors.is_empty() => Ok(ValidatedDraft {
            symptom,
            severity,
            description: non_blank(&draft.description),
            triggers: non_blank(&draft.triggers),
        }),
        _ => Err(ValidationErrors(errors)),
    }
}

// ═══════════════════════════════════════════
// History view
// ═══════════════════════════════════════════

/// Splits "stress, poor sleep" into individual trigger tags.
pub fn split_triggers(triggers: &str) -> Vec<String> {
    triggers
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// One history card: the entry plus everything derived for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub entry: SymptomEntry,
    pub display: SeverityDisplay,
    /// e.g. "4/10 - Moderate"
    pub badge_text: String,
    pub severity_percent: u8,
    pub triggers: Vec<String>,
}

impl From<SymptomEntry> for HistoryItem {
    fn from(entry: SymptomEntry) -> Self {
        let display = classify(entry.severity);
        let triggers = entry
            .triggers
            .as_deref()
            .map(split_triggers)
            .unwrap_or_default();
        Self {
            badge_text: format!("{}/10 - {}", entry.severity, display.label),
            severity_percent: severity_percent(entry.severity),
            display,
            triggers,
            entry,
        }
    }
}

pub fn history_items(entries: Vec<SymptomEntry>) -> Vec<HistoryItem> {
    entries.into_iter().map(HistoryItem::from).collect()
}

// ═══════════════════════════════════════════
// Insights
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomCount {
    pub symptom: String,
    pub times: usize,
}

/// Summary figures for the "Health Insights" card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInsights {
    pub logged_this_week: usize,
    pub average_severity: Option<f32>,
    pub most_common: Option<SymptomCount>,
    pub common_trigger: Option<String>,
}

impl HealthInsights {
    /// "5.7/10", or `None` when nothing was logged this week.
    pub fn average_severity_text(&self) -> Option<String> {
        self.average_severity.map(|avg| format!("{avg:.1}/10"))
    }
}

/// Counts keyed case-insensitively, keeping first-seen spelling and order.
fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts
            .iter_mut()
            .find(|(seen, _)| seen.eq_ignore_ascii_case(value))
        {
            Some((_, n)) => *n += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts
}

/// Highest count wins; ties go to the earliest value in the list.
fn most_frequent(counts: Vec<(String, usize)>) -> Option<(String, usize)> {
    counts
        .into_iter()
        .fold(None, |best: Option<(String, usize)>, (value, n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((value, n)),
        })
}

pub fn summarize_insights(entries: &[SymptomEntry], today: NaiveDate) -> HealthInsights {
    // Near the bottom of chrono's calendar the window is clipped, not wrapped.
    let window_start = today
        .checked_sub_signed(Duration::days(INSIGHT_WINDOW_DAYS - 1))
        .unwrap_or(NaiveDate::MIN);
    let this_week: Vec<&SymptomEntry> = entries
        .iter()
        .filter(|e| e.date >= window_start && e.date <= today)
        .collect();

    let average_severity = if this_week.is_empty() {
        None
    } else {
        let total: i64 = this_week.iter().map(|e| i64::from(e.severity)).sum();
        Some(total as f32 / this_week.len() as f32)
    };

    let most_common = most_frequent(tally(entries.iter().map(|e| e.symptom.as_str())))
        .map(|(symptom, times)| SymptomCount { symptom, times });

    let all_triggers: Vec<String> = entries
        .iter()
        .filter_map(|e| e.triggers.as_deref())
        .flat_map(split_triggers)
        .collect();
    let common_trigger =
        most_frequent(tally(all_triggers.iter().map(String::as_str))).map(|(t, _)| t);

    HealthInsights {
        logged_this_week: this_week.len(),
        average_severity,
        most_common,
        common_trigger,
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
