use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::sampler::DEFAULT_SAMPLE_SIZE;

/// Upper bound on names per generation (grid gets unreadable past this)
pub const MAX_SAMPLE_SIZE: usize = 50;

/// A user-supplied category backed by a JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub key: String,  // Field holding the list, e.g. "beybladeNames"
    pub path: PathBuf,  // Relative paths resolve against data_dir
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

/// Hex color overrides (`#RRGGBB` or `#RGB`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_selected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<String>,
    /// Defaults to the danger color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Names drawn per generation
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Category shown on startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_category: Option<String>,

    /// Base directory for relative category paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Extra categories (or overrides of bundled ones)
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            default_category: None,
            data_dir: None,
            categories: Vec::new(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("namedeck");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(AppConfig::default()),
        }
    }

    /// Load config from `path`. A missing file is created with defaults;
    /// an unreadable one is logged and replaced by defaults in memory only.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => return Ok(config.normalized()),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(path) {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Clamp values into their usable range
    fn normalized(mut self) -> Self {
        let clamped = self.sample_size.clamp(1, MAX_SAMPLE_SIZE);
        if clamped != self.sample_size {
            tracing::warn!(
                "sample_size {} out of range, using {}",
                self.sample_size,
                clamped
            );
            self.sample_size = clamped;
        }

        // Drop categories that can never resolve
        self.categories.retain(|c| {
            let ok = !c.id.trim().is_empty() && !c.key.trim().is_empty();
            if !ok {
                tracing::warn!("Ignoring category with empty id or key: {:?}", c);
            }
            ok
        });

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            sample_size: 12,
            default_category: Some("beyblade".to_string()),
            data_dir: Some(PathBuf::from("/srv/names")),
            categories: vec![CategoryConfig {
                id: "pokemon".to_string(),
                title: Some("Pokemon Nicknames".to_string()),
                key: "pokemonNames".to_string(),
                path: PathBuf::from("pokemon.json"),
                about: None,
            }],
            theme: ThemeConfig {
                accent: Some("#ffc107".to_string()),
                ..ThemeConfig::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(deserialized.sample_size, 12);
        assert_eq!(config.default_category, deserialized.default_category);
        assert_eq!(deserialized.categories.len(), 1);
        assert_eq!(deserialized.categories[0].key, "pokemonNames");
        assert_eq!(config.theme, deserialized.theme);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.sample_size, DEFAULT_SAMPLE_SIZE);
        assert!(config.categories.is_empty());
        assert!(config.default_category.is_none());
    }

    #[test]
    fn test_sample_size_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "sample_size = 0\n").unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap().sample_size, 1);

        std::fs::write(&path, "sample_size = 500\n").unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap().sample_size, MAX_SAMPLE_SIZE);
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.sample_size, DEFAULT_SAMPLE_SIZE);
        assert!(path.exists());
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "sample_size = \"many\"").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.sample_size, DEFAULT_SAMPLE_SIZE);
        // Left alone so the user can fix it
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "sample_size = \"many\"");
    }

    #[test]
    fn test_blank_categories_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[[categories]]
id = ""
key = "x"
path = "x.json"

[[categories]]
id = "ok"
key = "okNames"
path = "ok.json"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.categories[0].id, "ok");
    }
}
