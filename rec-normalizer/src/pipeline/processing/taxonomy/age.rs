//! Age-category tagging from age and text signals.

use rec_core::domain::{AgeCategory, CanonicalActivity};

const BABY_MAX_AGE: u8 = 1;
const EARLY_YEARS_RANGE: (u8, u8) = (2, 6);
const SCHOOL_AGE_RANGE: (u8, u8) = (5, 13);
const YOUTH_RANGE: (u8, u8) = (10, 18);

/// Compute age-category tags for an assembled activity.
///
/// Age bounds drive the buckets when present; otherwise keywords in the
/// raw category label are the fallback signal. Programs whose effective
/// minimum age is <= 1 are always tagged `baby-parent` and never enter
/// the early-years solo/parent split: a caregiver must be present for
/// children that young, whatever the listing text says.
pub(super) fn age_categories(activity: &CanonicalActivity) -> Vec<AgeCategory> {
    let cues = has_parent_cues(activity);

    // One-sided age data mirrors the present bound into a point interval.
    let bounds = match (activity.age_min, activity.age_max) {
        (Some(min), Some(max)) => Some((min, max)),
        (Some(min), None) => Some((min, min)),
        (None, Some(max)) => Some((max, max)),
        (None, None) => None,
    };

    let mut tags = match bounds {
        Some((min, max)) => from_age_interval(min, max, cues),
        None => Vec::new(),
    };
    if tags.is_empty() {
        tags = from_category_keywords(&activity.category, cues);
    }
    dedup(tags)
}

fn from_age_interval(min: u8, max: u8, parent_cues: bool) -> Vec<AgeCategory> {
    let mut tags = Vec::new();
    if min <= BABY_MAX_AGE || max <= BABY_MAX_AGE {
        tags.push(AgeCategory::BabyParent);
    } else if overlaps(min, max, EARLY_YEARS_RANGE) {
        tags.push(if parent_cues {
            AgeCategory::EarlyYearsParent
        } else {
            AgeCategory::EarlyYearsSolo
        });
    }
    if overlaps(min, max, SCHOOL_AGE_RANGE) {
        tags.push(AgeCategory::SchoolAge);
    }
    if overlaps(min, max, YOUTH_RANGE) {
        tags.push(AgeCategory::Youth);
    }
    tags
}

fn overlaps(min: u8, max: u8, range: (u8, u8)) -> bool {
    min <= range.1 && max >= range.0
}

fn from_category_keywords(category: &str, parent_cues: bool) -> Vec<AgeCategory> {
    let lower = category.to_lowercase();
    let mut tags = Vec::new();
    if lower.contains("school age") {
        tags.push(AgeCategory::SchoolAge);
    }
    if lower.contains("youth") {
        tags.push(AgeCategory::Youth);
    }
    if lower.contains("early years") {
        tags.push(if parent_cues {
            AgeCategory::EarlyYearsParent
        } else {
            AgeCategory::EarlyYearsSolo
        });
    }
    if lower.contains("all ages") {
        tags.extend(from_age_interval(0, 18, parent_cues));
    }
    tags
}

fn has_parent_cues(activity: &CanonicalActivity) -> bool {
    let name_desc = [
        Some(activity.name.as_str()),
        activity.description.as_deref(),
    ];
    for text in name_desc.into_iter().flatten() {
        let lower = text.to_lowercase();
        if lower.contains("parent") || lower.contains("tot") || lower.contains("& me") {
            return true;
        }
    }

    let cat_sub = [Some(activity.category.as_str()), activity.subcategory.as_deref()];
    cat_sub
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains("parent participation"))
}

fn dedup(tags: Vec<AgeCategory>) -> Vec<AgeCategory> {
    let mut out = Vec::with_capacity(tags.len());
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn activity(
        age_min: Option<u8>,
        age_max: Option<u8>,
        name: &str,
        description: Option<&str>,
        category: &str,
    ) -> CanonicalActivity {
        CanonicalActivity {
            external_id: "t".to_string(),
            name: name.to_string(),
            category: category.to_string(),
            subcategory: None,
            activity_type: "Other".to_string(),
            activity_subtype: None,
            age_categories: Vec::new(),
            date_start: None,
            date_end: None,
            start_time: None,
            end_time: None,
            day_of_week: Vec::new(),
            dates: None,
            cost: 0.0,
            spots_available: None,
            total_spots: None,
            age_min,
            age_max,
            location_name: None,
            full_address: None,
            registration_url: None,
            registration_status: Default::default(),
            description: description.map(|s| s.to_string()),
            full_description: None,
            instructor: None,
            what_to_bring: None,
            raw_data: json!({}),
        }
    }

    #[test]
    fn test_baby_parent_precedence_over_text_cues() {
        // Parent cues present, but age <= 1 always wins baby-parent alone.
        let a = activity(Some(0), Some(1), "Baby & Me Splash", None, "Swimming");
        assert_eq!(age_categories(&a), vec![AgeCategory::BabyParent]);
    }

    #[test]
    fn test_baby_parent_excludes_early_years_split() {
        let a = activity(Some(1), Some(4), "Tiny Tots", None, "Early Years");
        let tags = age_categories(&a);
        assert!(tags.contains(&AgeCategory::BabyParent));
        assert!(!tags.contains(&AgeCategory::EarlyYearsSolo));
        assert!(!tags.contains(&AgeCategory::EarlyYearsParent));
    }

    #[test]
    fn test_early_years_parent_split_on_cues() {
        let solo = activity(Some(3), Some(5), "Preschool Gym", None, "Gymnastics");
        assert!(age_categories(&solo).contains(&AgeCategory::EarlyYearsSolo));

        let with_parent = activity(Some(3), Some(5), "Parent & Tot Gym", None, "Gymnastics");
        assert!(age_categories(&with_parent).contains(&AgeCategory::EarlyYearsParent));
    }

    #[test]
    fn test_wide_range_carries_multiple_tags() {
        let a = activity(Some(4), Some(13), "Multi-Sport", None, "Sports");
        let tags = age_categories(&a);
        assert_eq!(
            tags,
            vec![
                AgeCategory::EarlyYearsSolo,
                AgeCategory::SchoolAge,
                AgeCategory::Youth
            ]
        );
    }

    #[test]
    fn test_single_bound_is_point_interval() {
        let a = activity(Some(8), None, "Rec Basketball", None, "Sports");
        assert_eq!(age_categories(&a), vec![AgeCategory::SchoolAge]);
    }

    #[test]
    fn test_category_keyword_fallback_without_age_data() {
        let a = activity(None, None, "Basketball", None, "School Age");
        assert_eq!(age_categories(&a), vec![AgeCategory::SchoolAge]);

        let a = activity(None, None, "Leaders in Training", None, "Youth");
        assert_eq!(age_categories(&a), vec![AgeCategory::Youth]);

        let a = activity(None, None, "Playtime", None, "Early Years");
        assert_eq!(age_categories(&a), vec![AgeCategory::EarlyYearsSolo]);

        let a = activity(
            None,
            None,
            "Playtime",
            None,
            "Early Years - Parent Participation",
        );
        assert_eq!(age_categories(&a), vec![AgeCategory::EarlyYearsParent]);
    }

    #[test]
    fn test_all_ages_keyword_expands_with_thresholds() {
        let a = activity(None, None, "Open Swim", None, "All Ages");
        let tags = age_categories(&a);
        assert_eq!(
            tags,
            vec![
                AgeCategory::BabyParent,
                AgeCategory::SchoolAge,
                AgeCategory::Youth
            ]
        );
    }

    #[test]
    fn test_no_signal_yields_empty() {
        let a = activity(None, None, "Something", None, "Unknown Thing");
        assert!(age_categories(&a).is_empty());
    }
}
