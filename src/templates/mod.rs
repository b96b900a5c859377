//! Built-in handbook templates using the Tera template engine
//!
//! The layout shell, index and article templates are embedded in the binary.
//! Autoescaping stays on: article bodies are the only values rendered with
//! `| safe`, and only because they are `TrustedHtml`.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{Post, TrustedHtml};
use crate::helpers::{html_escape, url_for};

/// Template renderer with the embedded handbook theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all handbook templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("handbook/layout.html")),
            ("index.html", include_str!("handbook/index.html")),
            ("handbook.html", include_str!("handbook/handbook.html")),
            (
                "partials/header.html",
                include_str!("handbook/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("handbook/partials/footer.html"),
            ),
        ])?;

        // Tera's default escaper also rewrites `/`, which mangles every href
        tera.autoescape_on(vec![".html"]);
        tera.set_escape_fn(html_escape);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub title: String,
    pub category: Option<String>,
    pub date: String,
    pub url: String,
    pub html: TrustedHtml,
}

impl PostData {
    pub fn from_post(post: &Post, config: &SiteConfig) -> Self {
        Self {
            title: post.title.clone(),
            category: post.category.clone(),
            date: post.date.clone(),
            url: url_for(config, &post.path),
            html: post.html.clone(),
        }
    }
}

/// Index entries never need the article body
#[derive(Debug, Clone, Serialize)]
pub struct IndexEntry {
    pub id: String,
    pub title: String,
    pub category: Option<String>,
    pub url: String,
}

impl IndexEntry {
    pub fn from_post(post: &Post, config: &SiteConfig) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            category: post.category.clone(),
            url: url_for(config, &post.path),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub description: String,
    pub language: String,
}

impl ConfigData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            description: config.description.clone(),
            language: config.language.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_context(config: &SiteConfig) -> Context {
        let mut context = Context::new();
        context.insert("config", &ConfigData::from_config(config));
        context.insert("site_title", config.site_title());
        context.insert("home_url", &url_for(config, "/"));
        context.insert("generator_version", "test");
        context
    }

    fn post(title: &str, category: Option<&str>, html: &str) -> Post {
        let mut post = Post::new(title.into(), "/article".into(), "article.md".into());
        post.category = category.map(str::to_string);
        post.date = "2021-01-01".into();
        post.html = TrustedHtml::new(html.into());
        post
    }

    #[test]
    fn test_layout_defaults_title() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let mut context = base_context(&config);
        context.insert("posts", &Vec::<IndexEntry>::new());

        let html = renderer.render("index.html", &context).unwrap();
        assert!(html.contains(r#"<a href="/">Title</a>"#));
        assert!(html.contains("<footer>"));
        assert!(html.contains(r#"<a href="/">Home</a>"#));
    }

    #[test]
    fn test_article_injects_trusted_html_only() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let post = post("<Tips & Tricks>", Some("Guides"), "<p>Body <em>text</em></p>");

        let mut context = base_context(&config);
        context.insert("post", &PostData::from_post(&post, &config));
        let html = renderer.render("handbook.html", &context).unwrap();

        assert!(html.contains("<h1>&lt;Tips &amp; Tricks&gt;</h1>"));
        assert!(html.contains("<h3>Guides</h3>"));
        assert!(html.contains("<h4>Last Update:<span>2021-01-01</span></h4>"));
        assert!(html.contains(r#"<div class="spacing"><p>Body <em>text</em></p></div>"#));
        assert!(html.contains(r#"<meta name="description" content="Body text">"#));
    }

    #[test]
    fn test_article_without_category() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let post = post("Loose", None, "<p>x</p>");

        let mut context = base_context(&config);
        context.insert("post", &PostData::from_post(&post, &config));
        let html = renderer.render("handbook.html", &context).unwrap();

        assert!(!html.contains("<h3>"));
    }

    #[test]
    fn test_index_entry_attributes() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let with_cat = post("Intro", Some("Guides"), "");
        let mut without_cat = post("Loose", None, "");
        without_cat.path = "/loose".into();

        let mut context = base_context(&config);
        context.insert(
            "posts",
            &vec![
                IndexEntry::from_post(&with_cat, &config),
                IndexEntry::from_post(&without_cat, &config),
            ],
        );
        let html = renderer.render("index.html", &context).unwrap();

        assert!(html.contains(r#"aria-label="Search" placeholder="Search..""#));
        assert!(html.contains(
            r#"<a href="/article" data-text="Intro" data-cat="Guides">Intro</a>"#
        ));
        assert!(html.contains(r#"<a href="/loose" data-text="Loose">Loose</a>"#));
        assert!(html.contains(&format!(r#"data-id="{}""#, with_cat.id)));

        // Entries without data-cat yield null from getAttribute and must not match
        assert!(html.contains("value !== null && value.toLowerCase().indexOf(query) !== -1"));
    }
}
