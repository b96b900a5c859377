//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Title shown in the header when the config does not set one
pub const DEFAULT_SITE_TITLE: &str = "Title";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: Option<String>,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Writing
    pub new_post_name: String,
    pub default_category: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: None,
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "content".to_string(),
            public_dir: "public".to_string(),

            new_post_name: ":title.md".to_string(),
            default_category: "Misc".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Site title for the header, falling back to "Title"
    pub fn site_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => DEFAULT_SITE_TITLE,
        }
    }
}
