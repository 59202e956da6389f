pub mod enums;
pub mod symptom;

pub use enums::{DraftField, InvalidEnum, SeverityTier};
pub use symptom::{SymptomDraft, SymptomEntry};
