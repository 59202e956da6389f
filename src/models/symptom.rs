use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::DraftField;

/// A logged symptom as held by the entry store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    pub id: u64,
    pub symptom: String,
    pub severity: i32,
    pub description: Option<String>,
    /// Comma-separated, as typed.
    pub triggers: Option<String>,
    pub date: NaiveDate,
    pub patient_name: String,
}

/// In-progress form state. Every field is kept as typed; `severity` is the
/// string value of the selected option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SymptomDraft {
    pub symptom: String,
    pub custom_symptom: String,
    pub severity: String,
    pub description: String,
    pub triggers: String,
}

impl SymptomDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Symptom => self.symptom = value,
            DraftField::CustomSymptom => self.custom_symptom = value,
            DraftField::Severity => self.severity = value,
            DraftField::Description => self.description = value,
            DraftField::Triggers => self.triggers = value,
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Symptom => &self.symptom,
            DraftField::CustomSymptom => &self.custom_symptom,
            DraftField::Severity => &self.severity,
            DraftField::Description => &self.description,
            DraftField::Triggers => &self.triggers,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_is_empty() {
        assert!(SymptomDraft::new().is_empty());
    }

    #[test]
    fn set_and_get_each_field() {
        let mut draft = SymptomDraft::new();
        for field in DraftField::ALL {
            draft.set(*field, format!("value-{}", field.as_str()));
        }
        for field in DraftField::ALL {
            assert_eq!(draft.get(*field), format!("value-{}", field.as_str()));
        }
        assert!(!draft.is_empty());

        draft.clear();
        assert!(draft.is_empty());
    }

    #[test]
    fn entry_serializes_with_camel_case_and_iso_date() {
        let entry = SymptomEntry {
            id: 7,
            symptom: "Headache".into(),
            severity: 4,
            description: None,
            triggers: Some("stress, poor sleep".into()),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            patient_name: "John Doe".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["patientName"], "John Doe");
        assert_eq!(json["date"], "2024-01-15");
        assert!(json["description"].is_null());
    }

    #[test]
    fn draft_deserializes_partial_form() {
        let draft: SymptomDraft =
            serde_json::from_str(r#"{"symptom":"Other","customSymptom":"Hiccups"}"#).unwrap();
        assert_eq!(draft.symptom, "Other");
        assert_eq!(draft.custom_symptom, "Hiccups");
        assert!(draft.severity.is_empty());
    }
}
