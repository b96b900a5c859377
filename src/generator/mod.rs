//! Generator module - writes the static site using the built-in templates

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use tera::Context;
use walkdir::WalkDir;

use crate::content::loader::check_unique;
use crate::content::{normalize_path, Post};
use crate::helpers::{strip_html, truncate, url_for};
use crate::templates::{ConfigData, IndexEntry, PostData, TemplateRenderer};
use crate::Handbook;

/// Entry of the generated search.json
#[derive(Debug, Clone, Serialize)]
struct SearchRecord<'a> {
    id: &'a str,
    title: &'a str,
    category: Option<&'a str>,
    path: String,
    date: &'a str,
    excerpt: String,
}

/// Static site generator using Tera templates
pub struct Generator {
    handbook: Handbook,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(handbook: &Handbook) -> Result<Self> {
        Ok(Self {
            handbook: handbook.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site from posts already sorted by category
    ///
    /// Routes are validated before anything is written, so a post can never
    /// replace the index page or land outside the public directory.
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        check_unique(posts)?;

        fs::create_dir_all(&self.handbook.public_dir)?;

        self.copy_source_assets()?;

        let index = self.render_index(posts)?;
        self.write_page("/", &index)?;
        tracing::info!("Generated index with {} entries", posts.len());

        for post in posts {
            let html = self.render_article(post)?;
            let output_path = self.write_page(&post.path, &html)?;
            tracing::debug!("Generated article: {:?}", output_path);
        }

        self.generate_search_index(posts)?;

        Ok(())
    }

    /// Render the index/search page
    pub fn render_index(&self, posts: &[Post]) -> Result<String> {
        let config = &self.handbook.config;
        let entries: Vec<IndexEntry> = posts
            .iter()
            .map(|p| IndexEntry::from_post(p, config))
            .collect();

        let mut context = self.create_base_context();
        context.insert("posts", &entries);

        self.renderer.render("index.html", &context)
    }

    /// Render a single article page
    pub fn render_article(&self, post: &Post) -> Result<String> {
        let mut context = self.create_base_context();
        context.insert("post", &PostData::from_post(post, &self.handbook.config));

        self.renderer.render("handbook.html", &context)
    }

    /// Create a base context with the layout shell variables
    fn create_base_context(&self) -> Context {
        let config = &self.handbook.config;
        let mut context = Context::new();
        context.insert("config", &ConfigData::from_config(config));
        context.insert("site_title", config.site_title());
        context.insert("home_url", &url_for(config, "/"));
        context.insert("generator_version", env!("CARGO_PKG_VERSION"));
        context
    }

    /// Write a rendered page to `<public>/<route>/index.html`
    fn write_page(&self, route: &str, html: &str) -> Result<PathBuf> {
        let route = normalize_path(route);
        if route.split('/').any(|segment| segment == "..") {
            anyhow::bail!("Refusing to write route {:?} outside the public directory", route);
        }
        // Strip leading slash from path to avoid creating absolute paths
        let clean_path = route.trim_start_matches('/');
        let output_path = self.handbook.public_dir.join(clean_path).join("index.html");

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;

        Ok(output_path)
    }

    /// Generate search index (JSON)
    fn generate_search_index(&self, posts: &[Post]) -> Result<()> {
        let config = &self.handbook.config;
        let records: Vec<SearchRecord> = posts
            .iter()
            .map(|p| SearchRecord {
                id: &p.id,
                title: &p.title,
                category: p.category.as_deref(),
                path: url_for(config, &p.path),
                date: &p.date,
                excerpt: truncate(strip_html(p.html.as_str()).trim(), 200, None),
            })
            .collect();

        let output_path = self.handbook.public_dir.join("search.json");
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&output_path, json)?;
        tracing::info!("Generated search.json");

        Ok(())
    }

    /// Copy source assets (images, etc.) to public directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.handbook.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            // Markdown files are rendered, not copied
            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("markdown")) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            let dest = self.handbook.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::copy(path, &dest)?;
            tracing::debug!("Copied asset: {:?}", relative);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentError, ContentLoader, ContentSource};
    use tempfile::TempDir;

    fn site(config: &str) -> (TempDir, Handbook) {
        let tmp = TempDir::new().unwrap();
        if !config.is_empty() {
            fs::write(tmp.path().join("_config.yml"), config).unwrap();
        }
        let content = tmp.path().join("content");
        fs::create_dir_all(content.join("img")).unwrap();
        fs::write(
            content.join("intro.md"),
            "---\npath: /intro\ntitle: Intro\ncategory: Guides\ndate: 2021-01-01\n---\nHello <b>team</b>.",
        )
        .unwrap();
        fs::write(
            content.join("faq.md"),
            "---\npath: /misc/faq\ntitle: FAQ\ncategory: Misc\ndate: 2021-03-01\n---\nAsk away.",
        )
        .unwrap();
        fs::write(content.join("img/logo.png"), [0u8, 1, 2]).unwrap();
        let handbook = Handbook::new(tmp.path()).unwrap();
        (tmp, handbook)
    }

    #[test]
    fn test_generate_writes_routes() {
        let (_tmp, handbook) = site("");
        let posts = ContentLoader::new(&handbook).fetch_posts().unwrap();
        Generator::new(&handbook).unwrap().generate(&posts).unwrap();

        let public = &handbook.public_dir;
        let index = fs::read_to_string(public.join("index.html")).unwrap();
        assert!(index.contains(r#"aria-label="Search""#));
        assert!(index.contains(r#"href="/intro""#));
        assert!(index.contains(r#"href="/misc/faq""#));
        assert!(index.find("Intro").unwrap() < index.find("FAQ").unwrap());

        let intro = fs::read_to_string(public.join("intro/index.html")).unwrap();
        assert!(intro.contains("<h1>Intro</h1>"));
        assert!(intro.contains("Hello <b>team</b>."));

        assert!(public.join("misc/faq/index.html").exists());
        assert_eq!(fs::read(public.join("img/logo.png")).unwrap(), vec![0u8, 1, 2]);
        assert!(!public.join("intro.md").exists());
    }

    #[test]
    fn test_search_index() {
        let (_tmp, handbook) = site("");
        let posts = ContentLoader::new(&handbook).fetch_posts().unwrap();
        Generator::new(&handbook).unwrap().generate(&posts).unwrap();

        let json = fs::read_to_string(handbook.public_dir.join("search.json")).unwrap();
        let records: serde_json::Value = serde_json::from_str(&json).unwrap();
        let records = records.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["title"], "Intro");
        assert_eq!(records[0]["category"], "Guides");
        assert_eq!(records[0]["path"], "/intro");
        assert_eq!(records[0]["excerpt"], "Hello team.");
        assert_eq!(records[0]["id"], posts[0].id.as_str());
    }

    #[test]
    fn test_site_title_from_config() {
        let (_tmp, handbook) = site("title: Ops Handbook\nroot: /docs/\n");
        let generator = Generator::new(&handbook).unwrap();
        let posts = ContentLoader::new(&handbook).fetch_posts().unwrap();

        let index = generator.render_index(&posts).unwrap();
        assert!(index.contains(r#"<a href="/docs/">Ops Handbook</a>"#));
        assert!(index.contains(r#"href="/docs/intro""#));

        let article = generator.render_article(&posts[1]).unwrap();
        assert!(article.contains("<title>FAQ | Ops Handbook</title>"));
    }

    #[test]
    fn test_root_route_does_not_replace_index() {
        let (_tmp, handbook) = site("");
        let mut posts = ContentLoader::new(&handbook).fetch_posts().unwrap();
        posts[0].path = "/".into();

        let err = Generator::new(&handbook).unwrap().generate(&posts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::ReservedPath { .. })
        ));
        assert!(!handbook.public_dir.join("index.html").exists());
    }

    #[test]
    fn test_trailing_slash_routes_collide() {
        let (_tmp, handbook) = site("");
        let mut posts = ContentLoader::new(&handbook).fetch_posts().unwrap();
        posts[1].path = "/intro/".into();

        let err = Generator::new(&handbook).unwrap().generate(&posts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn test_parent_route_stays_inside_public() {
        let (tmp, handbook) = site("");
        let mut posts = ContentLoader::new(&handbook).fetch_posts().unwrap();
        posts[0].path = "/../escaped".into();

        let err = Generator::new(&handbook).unwrap().generate(&posts).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::PathEscapesOutput { .. })
        ));
        assert!(!tmp.path().join("escaped").exists());
    }
}
