//! Category / activity-type resolution.
//!
//! Maps legacy free-form category and subcategory labels onto the closed
//! activity-type taxonomy, and derives age-category tags from age and text
//! signals. The rule table is built once into a lazy static and never
//! mutated afterward; rules are explicitly ordered lists evaluated
//! top-to-bottom with first-match-wins, so tie-breaks are a visible,
//! tested contract rather than map iteration order.

mod age;
mod rules;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::observability::metrics;
use rec_core::domain::{AgeCategory, CanonicalActivity};

pub use rules::ACTIVITY_TYPES;

/// Rule for one legacy category label.
#[derive(Debug)]
pub enum CategoryRule {
    /// Fixed type; subtype picked by the first keyword contained in the
    /// subcategory, else the default, else the raw subcategory text.
    Direct {
        activity_type: &'static str,
        subtype_keywords: &'static [(&'static str, &'static str)],
        default_subtype: Option<&'static str>,
    },
    /// Umbrella label ("School Age", "Youth") bundling unrelated kinds of
    /// activity; the subcategory picks both type and subtype, matched
    /// exactly first and by substring containment second.
    Umbrella {
        mappings: &'static [(&'static str, &'static str, Option<&'static str>)],
    },
}

pub struct CategoryTable {
    rules: Vec<(&'static str, CategoryRule)>,
}

impl CategoryTable {
    fn lookup(&self, category: &str) -> Option<&CategoryRule> {
        let wanted = category.trim();
        self.rules
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
            .map(|(_, rule)| rule)
    }
}

static CATEGORY_TABLE: Lazy<CategoryTable> = Lazy::new(|| CategoryTable {
    rules: rules::category_rules(),
});

/// Result of classifying one activity against the taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityClassification {
    pub activity_type: String,
    pub activity_subtype: Option<String>,
    pub age_categories: Vec<AgeCategory>,
}

/// Classify an assembled activity: resolve its legacy category/subcategory
/// to an activity type and subtype, and compute its age-category tags.
pub fn map_activity(activity: &CanonicalActivity) -> ActivityClassification {
    let resolution = resolve(&activity.category, activity.subcategory.as_deref());
    ActivityClassification {
        activity_type: resolution.0,
        activity_subtype: resolution.1,
        age_categories: age::age_categories(activity),
    }
}

/// Resolve a legacy category/subcategory pair to `(type, subtype)`.
///
/// An unmapped category degrades to the literal type "Other" with the
/// subcategory (or category) as subtype; the record is never dropped.
pub fn resolve(category: &str, subcategory: Option<&str>) -> (String, Option<String>) {
    match CATEGORY_TABLE.lookup(category) {
        Some(CategoryRule::Direct {
            activity_type,
            subtype_keywords,
            default_subtype,
        }) => {
            let subtype = match subcategory {
                Some(sub) => {
                    let sub_lower = sub.to_lowercase();
                    subtype_keywords
                        .iter()
                        .find(|(keyword, _)| sub_lower.contains(keyword))
                        .map(|(_, subtype)| (*subtype).to_string())
                        .or_else(|| default_subtype.map(|d| d.to_string()))
                        .or_else(|| Some(sub.to_string()))
                }
                None => default_subtype.map(|d| d.to_string()),
            };
            ((*activity_type).to_string(), subtype)
        }
        Some(CategoryRule::Umbrella { mappings }) => {
            let sub = subcategory.unwrap_or_default().trim();
            // Exact match first, then substring containment.
            let matched = mappings
                .iter()
                .find(|(key, _, _)| key.eq_ignore_ascii_case(sub))
                .or_else(|| {
                    let sub_lower = sub.to_lowercase();
                    mappings
                        .iter()
                        .find(|(key, _, _)| sub_lower.contains(&key.to_lowercase()))
                });
            match matched {
                Some((_, activity_type, subtype)) => {
                    let subtype = subtype
                        .map(|s| s.to_string())
                        .or_else(|| subcategory.map(|s| s.to_string()));
                    ((*activity_type).to_string(), subtype)
                }
                None => {
                    warn!(
                        "No umbrella mapping for subcategory '{}' under category '{}'",
                        sub, category
                    );
                    metrics::taxonomy::unmapped_category(category);
                    ("Other".to_string(), fallback_subtype(category, subcategory))
                }
            }
        }
        None => {
            if !category.trim().is_empty() {
                warn!("Unmapped category '{}', degrading to Other", category);
            }
            metrics::taxonomy::unmapped_category(category);
            ("Other".to_string(), fallback_subtype(category, subcategory))
        }
    }
}

fn fallback_subtype(category: &str, subcategory: Option<&str>) -> Option<String> {
    subcategory
        .map(|s| s.to_string())
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            let trimmed = category.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_rule_keyword_subtype() {
        let (activity_type, subtype) = resolve("Swimming", Some("Swim Beginner"));
        assert_eq!(activity_type, "Swimming & Aquatics");
        assert_eq!(subtype.as_deref(), Some("Learn to Swim"));
    }

    #[test]
    fn test_direct_rule_default_subtype() {
        let (activity_type, subtype) = resolve("Swimming", Some("Bronze Medallion"));
        assert_eq!(activity_type, "Swimming & Aquatics");
        assert_eq!(subtype.as_deref(), Some("Swimming Lessons"));
    }

    #[test]
    fn test_direct_rule_case_insensitive_category() {
        let (activity_type, _) = resolve("swimming", None);
        assert_eq!(activity_type, "Swimming & Aquatics");
    }

    #[test]
    fn test_umbrella_exact_match() {
        let (activity_type, subtype) = resolve("School Age", Some("Basketball"));
        assert_eq!(activity_type, "Team Sports");
        assert_eq!(subtype.as_deref(), Some("Basketball"));
    }

    #[test]
    fn test_umbrella_substring_match() {
        let (activity_type, subtype) = resolve("Youth", Some("Advanced Coding Club"));
        assert_eq!(activity_type, "STEM & Academics");
        assert_eq!(subtype.as_deref(), Some("Coding"));
    }

    #[test]
    fn test_umbrella_first_match_wins() {
        // "Martial Arts" is listed before "Art"; a martial-arts subcategory
        // must not fall into Visual Arts even though "Art" is a substring.
        let (activity_type, _) = resolve("School Age", Some("Martial Arts Intro"));
        assert_eq!(activity_type, "Martial Arts");
    }

    #[test]
    fn test_umbrella_subtype_defaults_to_raw_subcategory() {
        let (activity_type, subtype) = resolve("School Age", Some("Swim Advanced"));
        assert_eq!(activity_type, "Swimming & Aquatics");
        assert_eq!(subtype.as_deref(), Some("Swim Advanced"));
    }

    #[test]
    fn test_unmapped_category_degrades_to_other() {
        let (activity_type, subtype) = resolve("Unknown Thing", Some("Mystery"));
        assert_eq!(activity_type, "Other");
        assert_eq!(subtype.as_deref(), Some("Mystery"));

        let (activity_type, subtype) = resolve("Unknown Thing", None);
        assert_eq!(activity_type, "Other");
        assert_eq!(subtype.as_deref(), Some("Unknown Thing"));
    }

    #[test]
    fn test_every_rule_type_is_in_the_closed_taxonomy() {
        for (_, rule) in &CATEGORY_TABLE.rules {
            match rule {
                CategoryRule::Direct { activity_type, .. } => {
                    assert!(
                        ACTIVITY_TYPES.contains(activity_type),
                        "direct rule type '{}' not in taxonomy",
                        activity_type
                    );
                }
                CategoryRule::Umbrella { mappings } => {
                    for (key, activity_type, _) in *mappings {
                        assert!(
                            ACTIVITY_TYPES.contains(activity_type),
                            "umbrella mapping '{}' -> '{}' not in taxonomy",
                            key,
                            activity_type
                        );
                    }
                }
            }
        }
    }
}
