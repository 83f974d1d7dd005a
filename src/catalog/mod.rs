pub mod bundled;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::AppConfig;

/// A single `{name, description}` record from a category list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
impl NameEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Full list of entries for one category. Never mutated after load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCollection {
    key: String,
    entries: Vec<NameEntry>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("data file is not a JSON object")]
    NotAnObject,

    #[error("key '{0}' not found in data file")]
    MissingKey(String),

    #[error("key '{key}' is not a list of name entries: {source}")]
    BadEntries {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown category '{id}' (available: {available})")]
    UnknownCategory { id: String, available: String },
}

impl NameCollection {
    pub fn new(key: impl Into<String>, entries: Vec<NameEntry>) -> Self {
        Self {
            key: key.into(),
            entries,
        }
    }

    /// Parse `{ "<key>": [ {"name": .., "description": ..}, .. ] }`
    pub fn from_json(key: &str, text: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let mut object = match value {
            serde_json::Value::Object(map) => map,
            _ => return Err(CatalogError::NotAnObject),
        };

        let list = object
            .remove(key)
            .ok_or_else(|| CatalogError::MissingKey(key.to_string()))?;

        let entries: Vec<NameEntry> =
            serde_json::from_value(list).map_err(|source| CatalogError::BadEntries {
                key: key.to_string(),
                source,
            })?;

        Ok(Self::new(key, entries))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where a category's JSON lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySource {
    /// Compiled into the binary
    Bundled(&'static str),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub key: String,
    pub about: String,
    pub source: CategorySource,
}

impl Category {
    /// Short label for `--list` output
    pub fn source_label(&self) -> String {
        match &self.source {
            CategorySource::Bundled(_) => "bundled".to_string(),
            CategorySource::File(path) => path.display().to_string(),
        }
    }
}

/// Ordered set of available categories
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn bundled() -> Self {
        Self {
            categories: bundled::categories(),
        }
    }

    /// Bundled categories plus the ones declared in config. A configured
    /// category replaces a bundled one with the same id in place.
    pub fn from_config(config: &AppConfig, base_dir: Option<&Path>) -> Self {
        let mut catalog = Self::bundled();
        let data_dir = config.data_dir.as_deref().or(base_dir);

        for entry in &config.categories {
            let path = match data_dir {
                Some(dir) if entry.path.is_relative() => dir.join(&entry.path),
                _ => entry.path.clone(),
            };

            let category = Category {
                id: entry.id.clone(),
                title: entry.title.clone().unwrap_or_else(|| entry.id.clone()),
                key: entry.key.clone(),
                about: entry.about.clone().unwrap_or_default(),
                source: CategorySource::File(path),
            };

            catalog.insert(category);
        }

        catalog
    }

    fn insert(&mut self, category: Category) {
        if let Some(existing) = self.categories.iter_mut().find(|c| c.id == category.id) {
            tracing::debug!("Configured category '{}' overrides bundled one", category.id);
            *existing = category;
        } else {
            self.categories.push(category);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    /// Like `get`, but with an error naming the valid ids
    pub fn require(&self, id: &str) -> Result<&Category, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::UnknownCategory {
            id: id.to_string(),
            available: self.ids().join(", "),
        })
    }

    pub fn ids(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Resolve a category to its collection
pub async fn load(category: &Category) -> Result<NameCollection, CatalogError> {
    let collection = match &category.source {
        CategorySource::Bundled(text) => NameCollection::from_json(&category.key, text)?,
        CategorySource::File(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CatalogError::Io {
                    path: path.clone(),
                    source,
                })?;
            NameCollection::from_json(&category.key, &text)?
        }
    };

    tracing::info!(
        "Loaded {} entries for category '{}'",
        collection.len(),
        category.id
    );
    Ok(collection)
}
