pub mod normalize;

pub use normalize::NormalizeStep;

/// Result of executing a batch step.
#[derive(Debug, Clone)]
pub struct StepResult {
    pub success: bool,
    pub processed_count: usize,
    pub failed_count: usize,
    pub message: String,
}

impl StepResult {
    pub fn success(processed: usize, message: String) -> Self {
        Self {
            success: true,
            processed_count: processed,
            failed_count: 0,
            message,
        }
    }

    pub fn with_failures(processed: usize, failed: usize, message: String) -> Self {
        Self {
            success: failed == 0,
            processed_count: processed,
            failed_count: failed,
            message,
        }
    }
}
