//! Severity classification for the 1–10 symptom scale.
//!
//! Maps a raw severity to one of four display tiers. The mapping is a static
//! lookup table with no rendering concerns; callers decide how to draw the
//! label, color category and emoji. Values outside 1–10 are *unclassified*
//! and produce an empty display rather than an error.

use serde::Serialize;

use crate::models::SeverityTier;

// ═══════════════════════════════════════════
// Lookup table
// ═══════════════════════════════════════════

pub const SEVERITY_MIN: i32 = 1;
pub const SEVERITY_MAX: i32 = 10;

/// One row of the tier table: inclusive bounds plus display attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierRow {
    pub tier: SeverityTier,
    pub min: i32,
    pub max: i32,
    pub label: &'static str,
    pub color_class: &'static str,
    pub emoji: &'static str,
    pub glyph: &'static str,
    pub badge_classes: &'static str,
}

/// Non-overlapping, ordered; first match wins.
pub const SEVERITY_TABLE: [TierRow; 4] = [
    TierRow {
        tier: SeverityTier::Mild,
        min: 1,
        max: 3,
        label: "Mild",
        color_class: "low",
        emoji: "calm",
        glyph: "\u{1F60A}",
        badge_classes: "bg-green-100 text-green-800 border-green-200",
    },
    TierRow {
        tier: SeverityTier::Moderate,
        min: 4,
        max: 6,
        label: "Moderate",
        color_class: "medium",
        emoji: "neutral",
        glyph: "\u{1F610}",
        badge_classes: "bg-orange-100 text-orange-800 border-orange-200",
    },
    TierRow {
        tier: SeverityTier::High,
        min: 7,
        max: 8,
        label: "High",
        color_class: "high",
        emoji: "concerned",
        glyph: "\u{1F61F}",
        badge_classes: "bg-red-100 text-red-800 border-red-200",
    },
    TierRow {
        tier: SeverityTier::Severe,
        min: 9,
        max: 10,
        label: "Severe",
        color_class: "severe",
        emoji: "distressed",
        glyph: "\u{1F630}",
        badge_classes: "bg-red-200 text-red-900 border-red-300",
    },
];

fn row_for(severity: i32) -> Option<&'static TierRow> {
    SEVERITY_TABLE
        .iter()
        .find(|row| severity >= row.min && severity <= row.max)
}

fn row_of(tier: SeverityTier) -> &'static TierRow {
    match tier {
        SeverityTier::Mild => &SEVERITY_TABLE[0],
        SeverityTier::Moderate => &SEVERITY_TABLE[1],
        SeverityTier::High => &SEVERITY_TABLE[2],
        SeverityTier::Severe => &SEVERITY_TABLE[3],
    }
}

impl SeverityTier {
    pub fn from_severity(severity: i32) -> Option<Self> {
        row_for(severity).map(|row| row.tier)
    }

    pub fn label(&self) -> &'static str {
        row_of(*self).label
    }

    pub fn color_class(&self) -> &'static str {
        row_of(*self).color_class
    }

    pub fn emoji(&self) -> &'static str {
        row_of(*self).emoji
    }

    /// Emoji character shown next to history entries.
    pub fn glyph(&self) -> &'static str {
        row_of(*self).glyph
    }

    /// Utility classes for the history badge.
    pub fn badge_classes(&self) -> &'static str {
        row_of(*self).badge_classes
    }

    /// Inclusive severity bounds of this tier.
    pub fn range(&self) -> (i32, i32) {
        let row = row_of(*self);
        (row.min, row.max)
    }
}

// ═══════════════════════════════════════════
// Classification
// ═══════════════════════════════════════════

/// Display attributes for one severity value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityDisplay {
    pub label: &'static str,
    pub color_class: &'static str,
    pub emoji: &'static str,
}

impl SeverityDisplay {
    /// `false` for out-of-range input; render a neutral fallback.
    pub fn is_classified(&self) -> bool {
        !self.label.is_empty()
    }
}

/// Classify a severity. Pure and total: anything outside 1–10 yields the
/// empty display.
pub fn classify(severity: i32) -> SeverityDisplay {
    match row_for(severity) {
        Some(row) => SeverityDisplay {
            label: row.label,
            color_class: row.color_class,
            emoji: row.emoji,
        },
        None => SeverityDisplay::default(),
    }
}

/// Width of the history severity bar, in percent.
pub fn severity_percent(severity: i32) -> u8 {
    severity.saturating_mul(10).clamp(0, 100) as u8
}

// ═══════════════════════════════════════════
// Picker data
// ═══════════════════════════════════════════

/// One option of the severity picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeverityOption {
    pub value: String,
    pub text: String,
}

/// The ten picker options, `1 - Mild` through `10 - Severe`.
pub fn severity_options() -> Vec<SeverityOption> {
    (SEVERITY_MIN..=SEVERITY_MAX)
        .map(|severity| SeverityOption {
            value: severity.to_string(),
            text: format!("{} - {}", severity, classify(severity).label),
        })
        .collect()
}

/// Guide rows shown under the picker, e.g. `1-3: Mild`.
pub fn severity_guide() -> Vec<String> {
    SEVERITY_TABLE
        .iter()
        .map(|row| format!("{}-{}: {}", row.min, row.max, row.label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mild_range() {
        for s in 1..=3 {
            let d = classify(s);
            assert_eq!(d.label, "Mild");
            assert_eq!(d.color_class, "low");
            assert_eq!(d.emoji, "calm");
        }
    }

    #[test]
    fn moderate_range() {
        for s in 4..=6 {
            let d = classify(s);
            assert_eq!(d.label, "Moderate");
            assert_eq!(d.color_class, "medium");
            assert_eq!(d.emoji, "neutral");
        }
    }

    #[test]
    fn high_range() {
        for s in 7..=8 {
            let d = classify(s);
            assert_eq!(d.label, "High");
            assert_eq!(d.color_class, "high");
            assert_eq!(d.emoji, "concerned");
        }
    }

    #[test]
    fn severe_range() {
        for s in 9..=10 {
            let d = classify(s);
            assert_eq!(d.label, "Severe");
            assert_eq!(d.color_class, "severe");
            assert_eq!(d.emoji, "distressed");
        }
    }

    #[test]
    fn out_of_range_is_empty() {
        for s in [0, -1, 11, i32::MIN, i32::MAX] {
            let d = classify(s);
            assert_eq!(d, SeverityDisplay::default());
            assert_eq!(d.label, "");
            assert_eq!(d.color_class, "");
            assert_eq!(d.emoji, "");
            assert!(!d.is_classified());
        }
    }

    #[test]
    fn boundary_examples() {
        let four = classify(4);
        assert_eq!(four.label, "Moderate");
        assert_eq!(four.color_class, "medium");
        assert_eq!(classify(10).label, "Severe");
        assert_eq!(classify(0).label, "");
        assert_eq!(classify(3).label, "Mild");
        assert_eq!(classify(7).label, "High");
        assert_eq!(classify(9).label, "Severe");
    }

    #[test]
    fn classification_is_repeatable() {
        for s in -5..=15 {
            assert_eq!(classify(s), classify(s));
        }
    }

    #[test]
    fn table_is_contiguous_and_non_overlapping() {
        assert_eq!(SEVERITY_TABLE[0].min, SEVERITY_MIN);
        assert_eq!(SEVERITY_TABLE[SEVERITY_TABLE.len() - 1].max, SEVERITY_MAX);
        for pair in SEVERITY_TABLE.windows(2) {
            assert_eq!(pair[0].max + 1, pair[1].min);
        }
    }

    #[test]
    fn tier_accessors_follow_table() {
        assert_eq!(SeverityTier::from_severity(5), Some(SeverityTier::Moderate));
        assert_eq!(SeverityTier::from_severity(11), None);
        assert_eq!(SeverityTier::High.range(), (7, 8));
        assert_eq!(SeverityTier::Severe.glyph(), "\u{1F630}");
        assert_eq!(
            SeverityTier::Mild.badge_classes(),
            "bg-green-100 text-green-800 border-green-200"
        );
        for tier in SeverityTier::ALL {
            let (min, _) = tier.range();
            assert_eq!(classify(min).label, tier.label());
        }
    }

    #[test]
    fn severity_percent_clamps() {
        assert_eq!(severity_percent(4), 40);
        assert_eq!(severity_percent(10), 100);
        assert_eq!(severity_percent(12), 100);
        assert_eq!(severity_percent(-3), 0);
        assert_eq!(severity_percent(i32::MAX), 100);
    }

    #[test]
    fn picker_has_ten_labelled_options() {
        let options = severity_options();
        assert_eq!(options.len(), 10);
        assert_eq!(options[0].value, "1");
        assert_eq!(options[0].text, "1 - Mild");
        assert_eq!(options[5].text, "6 - Moderate");
        assert_eq!(options[9].text, "10 - Severe");
    }

    #[test]
    fn guide_lists_four_tiers() {
        assert_eq!(
            severity_guide(),
            vec!["1-3: Mild", "4-6: Moderate", "7-8: High", "9-10: Severe"]
        );
    }

    #[test]
    fn display_serializes_camel_case() {
        let json = serde_json::to_value(classify(8)).unwrap();
        assert_eq!(json["label"], "High");
        assert_eq!(json["colorClass"], "high");
        assert_eq!(json["emoji"], "concerned");
    }
}
