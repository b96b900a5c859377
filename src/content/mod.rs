//! Content module - loads handbook articles and renders their markdown

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use loader::{ContentLoader, ContentSource};
pub use markdown::MarkdownRenderer;
pub use post::{normalize_path, post_id, Post, TrustedHtml};
