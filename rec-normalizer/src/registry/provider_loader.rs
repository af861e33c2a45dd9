use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use rec_core::common::error::{NormalizeError, Result};

use crate::pipeline::processing::mapper::FieldMappingConfig;

/// Configuration for one raw-data provider: identity, enablement, and the
/// field-mapping table that adapts its record shape to the canonical
/// schema. One JSON file per provider in the registry directory.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub provider_id: String,
    pub enabled: bool,
    #[serde(default)]
    pub field_mappings: FieldMappingConfig,
}

#[derive(Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderConfig>,
}

impl ProviderRegistry {
    /// Load all provider configurations from a registry directory.
    ///
    /// A missing directory or an empty registry is a startup error; a
    /// per-record mapping problem never is.
    pub fn load_from_directory<P: AsRef<Path>>(registry_dir: P) -> Result<Self> {
        let dir_path = registry_dir.as_ref();
        if !dir_path.exists() {
            return Err(NormalizeError::Config {
                message: format!("Registry directory does not exist: {}", dir_path.display()),
            });
        }

        let entries = fs::read_dir(dir_path).map_err(|e| NormalizeError::Config {
            message: format!("Failed to read registry directory: {}", e),
        })?;

        let mut providers = HashMap::new();
        for entry in entries {
            let entry = entry.map_err(|e| NormalizeError::Config {
                message: format!("Failed to read directory entry: {}", e),
            })?;

            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let content = fs::read_to_string(&path).map_err(|e| NormalizeError::Config {
                message: format!("Failed to read provider file {}: {}", path.display(), e),
            })?;
            let config: ProviderConfig =
                serde_json::from_str(&content).map_err(|e| NormalizeError::Config {
                    message: format!(
                        "Failed to parse provider config {}: {}",
                        path.display(),
                        e
                    ),
                })?;
            debug!(
                "Loaded provider config '{}' ({} field mappings)",
                config.provider_id,
                config.field_mappings.len()
            );
            providers.insert(config.provider_id.clone(), config);
        }

        if providers.is_empty() {
            return Err(NormalizeError::Config {
                message: format!(
                    "No provider configs found in {}",
                    dir_path.display()
                ),
            });
        }
        info!("Loaded {} provider configs", providers.len());
        Ok(Self { providers })
    }

    pub fn get_provider_config(&self, provider_id: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider_id)
    }

    pub fn is_provider_enabled(&self, provider_id: &str) -> bool {
        self.providers.get(provider_id).map_or(false, |p| p.enabled)
    }

    pub fn get_enabled_providers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .providers
            .values()
            .filter(|p| p.enabled)
            .map(|p| p.provider_id.clone())
            .collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path, file: &str, content: &str) {
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "cityrec.json",
            r#"{
                "provider_id": "cityrec",
                "enabled": true,
                "field_mappings": {
                    "name": "activity_name",
                    "cost": {"path": "fees.amount", "transform": "parseFloat"}
                }
            }"#,
        );
        write_config(
            dir.path(),
            "legacy.json",
            r#"{"provider_id": "legacy", "enabled": false}"#,
        );
        // Non-JSON files are ignored.
        write_config(dir.path(), "notes.txt", "not a config");

        let registry = ProviderRegistry::load_from_directory(dir.path()).unwrap();
        assert!(registry.is_provider_enabled("cityrec"));
        assert!(!registry.is_provider_enabled("legacy"));
        assert_eq!(registry.get_enabled_providers(), vec!["cityrec"]);

        let config = registry.get_provider_config("cityrec").unwrap();
        assert_eq!(config.field_mappings.len(), 2);
    }

    #[test]
    fn test_missing_directory_is_config_error() {
        let result = ProviderRegistry::load_from_directory("no/such/dir");
        assert!(matches!(result, Err(NormalizeError::Config { .. })));
    }

    #[test]
    fn test_empty_registry_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProviderRegistry::load_from_directory(dir.path());
        assert!(matches!(result, Err(NormalizeError::Config { .. })));
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "bad.json", "{not json");
        let result = ProviderRegistry::load_from_directory(dir.path());
        assert!(matches!(result, Err(NormalizeError::Config { .. })));
    }
}
