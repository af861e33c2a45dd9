// Normalization pipeline: field mapping, value normalization, taxonomy
// resolution, and the batch step runner.

pub mod processing;
pub mod steps;
