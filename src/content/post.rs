//! Post model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pre-rendered markup that is injected into pages without escaping.
///
/// Only the markdown renderer produces values of this type. Templates must
/// opt in with `| safe`; every other string is escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub(crate) fn new(html: String) -> Self {
        Self(html)
    }

    /// Borrow the raw markup
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A handbook article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Stable identifier, unique within a build
    pub id: String,

    /// Route the post is served at, always starting with `/`
    pub path: String,

    /// Display title
    pub title: String,

    /// Grouping key for the index
    pub category: Option<String>,

    /// Author name
    pub author: Option<String>,

    /// Display date, kept exactly as written in the front-matter
    pub date: String,

    /// Rendered body
    pub html: TrustedHtml,

    /// Source file path relative to the content directory
    pub source: String,
}

impl Post {
    /// Create a post with an id derived from its source path
    pub fn new(title: String, path: String, source: String) -> Self {
        Self {
            id: post_id(&source),
            path: normalize_path(&path),
            title,
            category: None,
            author: None,
            date: String::new(),
            html: TrustedHtml::default(),
            source,
        }
    }
}

/// Hex-encoded hash of a source path
pub fn post_id(source: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Canonical form of a route: leading `/`, no trailing `/`, no empty or `.` segments
///
/// Two routes that would be written to the same output file normalize to the
/// same string. `..` segments are kept so they can be rejected later.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .trim()
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    format!("/{}", segments.join("/"))
}
