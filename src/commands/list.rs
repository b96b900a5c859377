//! List site content

use anyhow::Result;
use std::io::Write;

use crate::content::{ContentLoader, ContentSource, Post};
use crate::Handbook;

/// Print every post grouped by category
pub fn run(handbook: &Handbook) -> Result<()> {
    let posts = ContentLoader::new(handbook).fetch_posts()?;
    let stdout = std::io::stdout();
    write_listing(&mut stdout.lock(), &posts)
}

/// Write the grouped listing; posts are already in category order
pub fn write_listing<W: Write>(out: &mut W, posts: &[Post]) -> Result<()> {
    writeln!(out, "Posts ({}):", posts.len())?;

    let mut current: Option<Option<&str>> = None;
    for post in posts {
        let category = post.category.as_deref();
        if current != Some(category) {
            writeln!(out, "{}", category.unwrap_or("(uncategorized)"))?;
            current = Some(category);
        }
        writeln!(out, "  {} - {} [{}]", post.date, post.title, post.path)?;
    }

    Ok(())
}
