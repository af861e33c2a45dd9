use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::common::error::{NormalizeError, Result};
use crate::domain::CanonicalActivity;

/// Outcome of an upsert against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Port to the external ingestion/persistence layer.
///
/// Canonical records are keyed by `(provider_id, external_id)`; the store
/// decides insert-vs-update. Timestamps and marking stale records inactive
/// are the store's concern, not the pipeline's.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn upsert_activity(
        &self,
        provider_id: &str,
        activity: &CanonicalActivity,
    ) -> Result<UpsertOutcome>;
}

/// In-memory store used by tests and the CLI dry-run path.
pub struct MemoryStore {
    activities: Arc<Mutex<HashMap<(String, String), CanonicalActivity>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            activities: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Snapshot of all stored activities, in no particular order.
    pub fn activities(&self) -> Vec<CanonicalActivity> {
        match self.activities.lock() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.activities.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn upsert_activity(
        &self,
        provider_id: &str,
        activity: &CanonicalActivity,
    ) -> Result<UpsertOutcome> {
        let key = (provider_id.to_string(), activity.external_id.clone());
        let mut map = self.activities.lock().map_err(|_| NormalizeError::Config {
            message: "memory store lock poisoned".to_string(),
        })?;

        let outcome = if map.insert(key, activity.clone()).is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        };
        debug!(
            "Upserted activity {} for provider {} ({:?})",
            activity.external_id, provider_id, outcome
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_activity(external_id: &str) -> CanonicalActivity {
        CanonicalActivity {
            external_id: external_id.to_string(),
            name: "Test Activity".to_string(),
            category: "Swimming".to_string(),
            subcategory: None,
            activity_type: "Swimming & Aquatics".to_string(),
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
            age_min: None,
            age_max: None,
            location_name: None,
            full_address: None,
            registration_url: None,
            registration_status: Default::default(),
            description: None,
            full_description: None,
            instructor: None,
            what_to_bring: None,
            raw_data: json!({}),
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_updates() {
        let store = MemoryStore::new();
        let activity = sample_activity("abc-123");

        let first = store.upsert_activity("provider-a", &activity).await.unwrap();
        assert_eq!(first, UpsertOutcome::Inserted);

        let second = store.upsert_activity("provider-a", &activity).await.unwrap();
        assert_eq!(second, UpsertOutcome::Updated);

        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_keyed_by_provider_and_external_id() {
        let store = MemoryStore::new();
        let activity = sample_activity("abc-123");

        store.upsert_activity("provider-a", &activity).await.unwrap();
        let outcome = store.upsert_activity("provider-b", &activity).await.unwrap();

        assert_eq!(outcome, UpsertOutcome::Inserted);
        assert_eq!(store.len(), 2);
    }
}
