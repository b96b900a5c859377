//! Content loader - loads handbook articles from the content directory

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentError, FrontMatter, MarkdownRenderer, Post};
use crate::Handbook;

/// Build-time source of posts consumed by the views
pub trait ContentSource {
    /// All posts, sorted ascending by category
    fn fetch_posts(&self) -> Result<Vec<Post>>;

    /// The post whose path matches exactly, if any
    fn fetch_post_by_path(&self, path: &str) -> Result<Option<Post>> {
        let path = super::normalize_path(path);
        Ok(self.fetch_posts()?.into_iter().find(|p| p.path == path))
    }
}

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    handbook: &'a Handbook,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(handbook: &'a Handbook) -> Self {
        Self {
            handbook,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load every published article under the source directory
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let source_dir = &self.handbook.source_dir;
        if !source_dir.exists() {
            tracing::warn!("Source directory {:?} does not exist", source_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_post(path) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => tracing::debug!("Skipping unpublished {:?}", path),
                Err(e) => tracing::warn!("Failed to load post {:?}: {}", path, e),
            }
        }

        sort_by_category(&mut posts);
        check_unique(&posts)?;

        Ok(posts)
    }

    /// Load a single post from a file, `None` if it is unpublished
    fn load_post(&self, path: &Path) -> Result<Option<Post>> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        if !fm.published {
            return Ok(None);
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let source = path
            .strip_prefix(&self.handbook.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        let title = fm.title.unwrap_or_else(|| stem.clone());
        let route = fm
            .path
            .unwrap_or_else(|| format!("/{}", slug::slugify(&stem)));

        let mut post = Post::new(title, route, source);
        post.category = fm.category;
        post.author = fm.author;
        post.date = fm.date.unwrap_or_default();
        post.html = self.renderer.render(body)?;

        Ok(Some(post))
    }
}

impl ContentSource for ContentLoader<'_> {
    fn fetch_posts(&self) -> Result<Vec<Post>> {
        self.load_posts()
    }
}

/// Order posts by category, uncategorized first, then by path
pub fn sort_by_category(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.path.cmp(&b.path))
    });
}

/// Reject collections whose routes clash or leave the output directory
///
/// Every post gets its own route, distinct from the index at `/`. Routes
/// are compared in canonical form, the same form the generator writes.
pub fn check_unique(posts: &[Post]) -> Result<(), ContentError> {
    let mut paths: HashMap<String, &str> = HashMap::new();
    let mut ids: HashMap<&str, &str> = HashMap::new();

    for post in posts {
        let route = super::normalize_path(&post.path);
        if route == "/" {
            return Err(ContentError::ReservedPath {
                path: post.path.clone(),
                source_file: post.source.clone(),
            });
        }
        if route.split('/').any(|segment| segment == "..") {
            return Err(ContentError::PathEscapesOutput {
                path: post.path.clone(),
                source_file: post.source.clone(),
            });
        }
        if let Some(first) = paths.insert(route.clone(), &post.source) {
            return Err(ContentError::DuplicatePath {
                path: route,
                first: first.to_string(),
                second: post.source.clone(),
            });
        }
        if let Some(first) = ids.insert(&post.id, &post.source) {
            return Err(ContentError::DuplicateId {
                id: post.id.clone(),
                first: first.to_string(),
                second: post.source.clone(),
            });
        }
    }

    Ok(())
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
