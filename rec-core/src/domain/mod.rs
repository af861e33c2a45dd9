use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registration availability for an activity session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RegistrationStatus {
    Open,
    Full,
    Closed,
    Waitlist,
    #[default]
    Unknown,
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RegistrationStatus::Open => "Open",
            RegistrationStatus::Full => "Full",
            RegistrationStatus::Closed => "Closed",
            RegistrationStatus::Waitlist => "Waitlist",
            RegistrationStatus::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Age-based filtering bucket. A single activity may belong to several
/// buckets (e.g. a 4-13 program is both early-years and school-age), or to
/// none when no age signal exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeCategory {
    BabyParent,
    EarlyYearsParent,
    EarlyYearsSolo,
    SchoolAge,
    Youth,
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgeCategory::BabyParent => "baby-parent",
            AgeCategory::EarlyYearsParent => "early-years-parent",
            AgeCategory::EarlyYearsSolo => "early-years-solo",
            AgeCategory::SchoolAge => "school-age",
            AgeCategory::Youth => "youth",
        };
        write!(f, "{}", s)
    }
}

/// An activity record normalized into the canonical schema.
///
/// Built fresh on every normalization pass; never mutated in place. The
/// ingestion layer diffs/upserts canonical records keyed by
/// `(provider_id, external_id)`.
///
/// Invariants upheld by the normalizer:
/// - `age_min <= age_max` whenever both are present; non-conforming pairs
///   are discarded back to `None`, never swapped.
/// - `activity_type` is never empty; unmapped categories degrade to "Other".
/// - `cost >= 0`.
/// - `day_of_week` and `age_categories` contain no duplicates.
/// - Any record with an effective minimum age <= 1 carries `baby-parent`
///   and never the early-years split tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalActivity {
    // Identity
    pub external_id: String,
    pub name: String,

    // Classification
    pub category: String,
    pub subcategory: Option<String>,
    pub activity_type: String,
    pub activity_subtype: Option<String>,
    pub age_categories: Vec<AgeCategory>,

    // Scheduling
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub day_of_week: Vec<String>,
    /// Human-readable derived range, e.g. "Sep 15 - Oct 20".
    pub dates: Option<String>,

    // Economics
    pub cost: f64,
    pub spots_available: Option<u32>,
    pub total_spots: Option<u32>,

    // Demographics
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,

    // Location
    pub location_name: Option<String>,
    pub full_address: Option<String>,

    // Registration
    pub registration_url: Option<String>,
    pub registration_status: RegistrationStatus,

    // Descriptive
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub instructor: Option<String>,
    pub what_to_bring: Option<String>,

    /// The original raw record, retained verbatim for audit/debugging.
    pub raw_data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_category_serializes_kebab_case() {
        let json = serde_json::to_string(&AgeCategory::BabyParent).unwrap();
        assert_eq!(json, "\"baby-parent\"");
        let json = serde_json::to_string(&AgeCategory::EarlyYearsSolo).unwrap();
        assert_eq!(json, "\"early-years-solo\"");
    }

    #[test]
    fn test_age_category_display_matches_wire_form() {
        assert_eq!(AgeCategory::SchoolAge.to_string(), "school-age");
        assert_eq!(AgeCategory::Youth.to_string(), "youth");
        assert_eq!(AgeCategory::EarlyYearsParent.to_string(), "early-years-parent");
    }

    #[test]
    fn test_registration_status_default_is_unknown() {
        assert_eq!(RegistrationStatus::default(), RegistrationStatus::Unknown);
    }
}
