//! handbook-rs: a static handbook site generator
//!
//! Markdown articles are rendered into a shared layout, one page per
//! article, plus an index page whose search box narrows the article list by
//! title or category.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod search;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main handbook application
#[derive(Debug, Clone)]
pub struct Handbook {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Source (content) directory
    pub source_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Handbook {
    /// Create a new Handbook instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new article
    pub fn new_post(&self, title: &str, category: Option<&str>) -> Result<()> {
        commands::new::create_post(self, title, category, None).map(|_| ())
    }
}
