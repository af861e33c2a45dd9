//! Metrics for the normalization pipeline.
//!
//! Metric names live in one enum so call sites never carry magic strings.
//! The `metrics` facade is recorder-agnostic; embedding callers install
//! whatever exporter they run with.

/// All metric names used by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    NormalizeRecordsProcessed,
    NormalizeRecordsSkipped,
    NormalizeWarnings,
    TaxonomyUnmappedCategory,
    IngestRecordsUpserted,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::NormalizeRecordsProcessed => "normalize_records_processed_total",
            MetricName::NormalizeRecordsSkipped => "normalize_records_skipped_total",
            MetricName::NormalizeWarnings => "normalize_warnings_total",
            MetricName::TaxonomyUnmappedCategory => "taxonomy_unmapped_category_total",
            MetricName::IngestRecordsUpserted => "ingest_records_upserted_total",
        }
    }
}

pub mod normalize {
    use super::MetricName;

    pub fn record_normalized(provider_id: &str) {
        metrics::counter!(
            MetricName::NormalizeRecordsProcessed.as_str(),
            "provider" => provider_id.to_string()
        )
        .increment(1);
    }

    pub fn record_skipped(provider_id: &str) {
        metrics::counter!(
            MetricName::NormalizeRecordsSkipped.as_str(),
            "provider" => provider_id.to_string()
        )
        .increment(1);
    }

    pub fn warning_logged(warning: &str) {
        metrics::counter!(
            MetricName::NormalizeWarnings.as_str(),
            "warning" => warning.to_string()
        )
        .increment(1);
    }
}

pub mod taxonomy {
    use super::MetricName;

    pub fn unmapped_category(category: &str) {
        metrics::counter!(
            MetricName::TaxonomyUnmappedCategory.as_str(),
            "category" => category.to_string()
        )
        .increment(1);
    }
}

pub mod ingest {
    use super::MetricName;

    pub fn record_upserted(provider_id: &str) {
        metrics::counter!(
            MetricName::IngestRecordsUpserted.as_str(),
            "provider" => provider_id.to_string()
        )
        .increment(1);
    }
}
