use crate::core::registry::CategoryRegistry;
use crate::domain::model::CategoryAttributes;
use crate::utils::error::{BirthdayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk form of a category registry.
///
/// ```toml
/// [[categories]]
/// id = "노년기"
/// age_range = "65-75세"
/// characteristics = "은퇴 생활, 건강 관리, 여가 활동"
/// desired_tone = "앞으로의 건강과 행복을 기원하는 말"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryFile {
    pub categories: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub id: String,
    /// Defaults to the id.
    pub label: Option<String>,
    pub age_range: String,
    pub characteristics: String,
    pub desired_tone: String,
}

impl RegistryFile {
    /// Reads and parses a registry file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BirthdayError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| BirthdayError::ConfigError {
            message: format!("registry TOML parsing error: {}", e),
        })
    }

    pub fn into_registry(self) -> Result<CategoryRegistry> {
        let entries = self
            .categories
            .into_iter()
            .map(|entry| {
                let label = entry.label.unwrap_or_else(|| entry.id.clone());
                (
                    entry.id,
                    CategoryAttributes {
                        label,
                        age_range: entry.age_range,
                        characteristics: entry.characteristics,
                        desired_tone: entry.desired_tone,
                    },
                )
            })
            .collect();
        CategoryRegistry::from_entries(entries)
    }
}

/// Loads and validates a registry file in one step.
pub fn load_registry<P: AsRef<Path>>(path: P) -> Result<CategoryRegistry> {
    let path = path.as_ref();
    tracing::debug!("Loading category registry from {}", path.display());
    let registry = RegistryFile::from_file(path)?.into_registry()?;
    tracing::info!("Loaded {} categories from {}", registry.len(), path.display());
    Ok(registry)
}
