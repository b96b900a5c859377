//! Search posts from the terminal with the index page's filter

use anyhow::Result;
use std::io::Write;

use crate::content::{ContentLoader, ContentSource, Post};
use crate::search::SearchState;
use crate::Handbook;

/// Print the posts the index page would show for `query`
pub fn run(handbook: &Handbook, query: &str) -> Result<()> {
    let posts = ContentLoader::new(handbook).fetch_posts()?;
    let stdout = std::io::stdout();
    write_results(&mut stdout.lock(), &posts, query)
}

pub fn write_results<W: Write>(out: &mut W, posts: &[Post], query: &str) -> Result<()> {
    let mut state = SearchState::new(posts);
    state.on_input(query);

    let shown = state.displayed();
    if shown.is_empty() {
        writeln!(out, "No matching articles for {:?}", state.query())?;
        return Ok(());
    }

    for post in shown {
        writeln!(
            out,
            "{} [{}] {}",
            post.title,
            post.category.as_deref().unwrap_or("-"),
            post.path
        )?;
    }

    Ok(())
}
