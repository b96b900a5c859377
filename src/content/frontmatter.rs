//! Front-matter parsing

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Front-matter data from a handbook article
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub path: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    /// Articles are published by default
    #[serde(default = "default_published")]
    pub published: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

fn default_published() -> bool {
    true
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            path: None,
            title: None,
            date: None,
            author: None,
            category: None,
            published: true,
            extra: HashMap::new(),
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        if content.starts_with("---") {
            return Ok(Self::parse_yaml(content));
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> (Self, &str) {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return (FrontMatter::default(), content);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        // A leading thematic break followed by prose is markdown, not YAML
        if !yaml_content.lines().any(looks_like_yaml_key) {
            return (FrontMatter::default(), content);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }
}

/// Whether a line has the `key: value` shape of a YAML mapping entry
fn looks_like_yaml_key(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }

    let Some(colon_pos) = trimmed.find(':') else {
        return false;
    };
    let key = &trimmed[..colon_pos];
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp");

    let after_colon = &trimmed[colon_pos + 1..];
    is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
}
