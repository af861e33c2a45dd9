pub mod traits;

pub use traits::{ActivityStore, MemoryStore, UpsertOutcome};
