use serde_json::Value;
use tracing::{debug, warn};

use rec_core::common::error::{NormalizeError, Result};
use rec_core::domain::CanonicalActivity;

use super::mapper::{map_field, FieldMappingConfig};
use super::taxonomy;
use super::values;
use crate::observability::metrics;

/// Builds one canonical activity record from one raw record.
///
/// Every sub-step degrades to a documented default, so a maximally
/// malformed object still yields a structurally valid record; the only
/// rejection is input that is not a JSON object at all.
pub struct ActivityNormalizer;

impl ActivityNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Resolve one canonical field: the provider's configured mapping when
    /// present, else the canonical field name looked up directly.
    fn field(&self, raw: &Value, config: &FieldMappingConfig, name: &str) -> Option<Value> {
        match config.get(name) {
            Some(mapping) => map_field(raw, mapping),
            None => raw.get(name).cloned().filter(|v| !v.is_null()),
        }
    }

    fn text_field(
        &self,
        raw: &Value,
        config: &FieldMappingConfig,
        name: &str,
    ) -> Option<String> {
        self.field(raw, config, name)
            .and_then(|v| values::value_to_string(&v))
    }

    pub fn normalize(
        &self,
        raw: &Value,
        config: &FieldMappingConfig,
    ) -> Result<CanonicalActivity> {
        if !raw.is_object() {
            return Err(NormalizeError::InvalidRecord {
                message: "raw record is not a JSON object".to_string(),
            });
        }

        let name = self
            .text_field(raw, config, "name")
            .unwrap_or_else(|| "Unknown Activity".to_string());
        let category = self.text_field(raw, config, "category").unwrap_or_default();
        let subcategory = self.text_field(raw, config, "subcategory");

        let date_start = self
            .field(raw, config, "dateStart")
            .and_then(|v| values::parse_date(&v));
        let date_end = self
            .field(raw, config, "dateEnd")
            .and_then(|v| values::parse_date(&v));
        let start_time = self
            .field(raw, config, "startTime")
            .and_then(|v| values::normalize_time(&v));
        let end_time = self
            .field(raw, config, "endTime")
            .and_then(|v| values::normalize_time(&v));
        let day_of_week = self
            .field(raw, config, "dayOfWeek")
            .map(|v| values::normalize_days_of_week(&v))
            .unwrap_or_default();

        let cost = self
            .field(raw, config, "cost")
            .map(|v| values::normalize_cost(&v))
            .unwrap_or(0.0);
        let spots_available = self
            .field(raw, config, "spotsAvailable")
            .and_then(|v| values::normalize_spots(&v));
        let total_spots = self
            .field(raw, config, "totalSpots")
            .and_then(|v| values::normalize_spots(&v));

        let mut age_min = self
            .field(raw, config, "ageMin")
            .and_then(|v| values::normalize_age(&v));
        let mut age_max = self
            .field(raw, config, "ageMax")
            .and_then(|v| values::normalize_age(&v));
        if age_min.is_none() && age_max.is_none() {
            if let Some((min, max)) = values::extract_age_range(raw) {
                debug!("Recovered age range {}-{} from text for '{}'", min, max, name);
                age_min = Some(min);
                age_max = Some(max);
            }
        }
        // Non-conforming pairs are discarded, never swapped.
        if let (Some(min), Some(max)) = (age_min, age_max) {
            if min > max {
                warn!(
                    "Discarding inverted age range {}-{} for '{}'",
                    min, max, name
                );
                metrics::normalize::warning_logged("age_range_inverted");
                age_min = None;
                age_max = None;
            }
        }

        let registration_url = self
            .field(raw, config, "registrationUrl")
            .and_then(|v| values::normalize_url(&v));
        let registration_status = self
            .field(raw, config, "registrationStatus")
            .map(|v| values::normalize_registration_status(&v))
            .unwrap_or_default();

        let dates = Some(values::format_date_range(date_start, date_end))
            .filter(|s| !s.is_empty());

        let external_id = self
            .text_field(raw, config, "externalId")
            .unwrap_or_else(|| values::generate_external_id(raw, &name, date_start));

        let mut activity = CanonicalActivity {
            external_id,
            name,
            category,
            subcategory,
            activity_type: String::new(),
            activity_subtype: None,
            age_categories: Vec::new(),
            date_start,
            date_end,
            start_time,
            end_time,
            day_of_week,
            dates,
            cost,
            spots_available,
            total_spots,
            age_min,
            age_max,
            location_name: self.text_field(raw, config, "locationName"),
            full_address: self.text_field(raw, config, "fullAddress"),
            registration_url,
            registration_status,
            description: self.text_field(raw, config, "description"),
            full_description: self.text_field(raw, config, "fullDescription"),
            instructor: self.text_field(raw, config, "instructor"),
            what_to_bring: self.text_field(raw, config, "whatToBring"),
            raw_data: raw.clone(),
        };

        let classification = taxonomy::map_activity(&activity);
        activity.activity_type = classification.activity_type;
        activity.activity_subtype = classification.activity_subtype;
        activity.age_categories = classification.age_categories;

        debug!(
            "Normalized '{}' ({}) -> {} / {:?}",
            activity.name, activity.external_id, activity.activity_type, activity.activity_subtype
        );
        Ok(activity)
    }
}

impl Default for ActivityNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
