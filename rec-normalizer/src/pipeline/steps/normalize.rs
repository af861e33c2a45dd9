use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info, warn};

use rec_core::storage::ActivityStore;

use super::StepResult;
use crate::observability::metrics;
use crate::pipeline::processing::ActivityNormalizer;
use crate::registry::ProviderConfig;

/// Batch step: normalize every raw record for a provider and hand each
/// canonical record to the store for upsert.
///
/// A malformed record (not an object) is skipped and counted, never fatal
/// to the batch; field-level parse failures are absorbed inside the
/// normalizer. The transform itself is stateless, so callers are free to
/// shard a batch across workers; this runner stays sequential.
pub struct NormalizeStep {
    normalizer: ActivityNormalizer,
}

impl NormalizeStep {
    pub fn new() -> Self {
        Self {
            normalizer: ActivityNormalizer::new(),
        }
    }

    pub async fn run(
        &self,
        provider: &ProviderConfig,
        raw_records: &[Value],
        store: &dyn ActivityStore,
    ) -> Result<StepResult> {
        info!(
            "Running normalize step for provider '{}' ({} raw records)",
            provider.provider_id,
            raw_records.len()
        );

        let mut normalized_count = 0;
        let mut skipped = 0;
        for raw in raw_records {
            let activity = match self.normalizer.normalize(raw, &provider.field_mappings) {
                Ok(activity) => activity,
                Err(e) => {
                    warn!("Skipping record: {}", e);
                    metrics::normalize::record_skipped(&provider.provider_id);
                    skipped += 1;
                    continue;
                }
            };

            metrics::normalize::record_normalized(&provider.provider_id);
            let outcome = store
                .upsert_activity(&provider.provider_id, &activity)
                .await
                .map_err(|e| anyhow::anyhow!("Upsert failed for '{}': {}", activity.external_id, e))?;
            metrics::ingest::record_upserted(&provider.provider_id);
            debug!("Upserted '{}' ({:?})", activity.external_id, outcome);
            normalized_count += 1;
        }

        let message = format!(
            "Normalize completed for {}: {} records normalized ({} skipped)",
            provider.provider_id, normalized_count, skipped
        );
        info!("{}", message);
        Ok(StepResult::with_failures(normalized_count, skipped, message))
    }
}

impl Default for NormalizeStep {
    fn default() -> Self {
        Self::new()
    }
}
