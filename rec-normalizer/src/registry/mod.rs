pub mod provider_loader;

pub use provider_loader::{ProviderConfig, ProviderRegistry};
