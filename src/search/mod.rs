//! Index search - narrows the post list by a free-text query
//!
//! A post matches when the query is a case-insensitive substring of its
//! title or of its category. Every input re-filters the complete collection,
//! so the result never depends on earlier queries.

use crate::content::Post;

/// Whether `post` matches `query` on its title or category
pub fn matches(post: &Post, query: &str) -> bool {
    let query = query.to_lowercase();
    matches_lowered(post, &query)
}

fn matches_lowered(post: &Post, query: &str) -> bool {
    let in_title = post.title.to_lowercase().contains(query);
    // A post without a category can only match on its title
    let in_category = post
        .category
        .as_deref()
        .is_some_and(|c| c.to_lowercase().contains(query));
    in_title || in_category
}

/// Posts matching `query`, in their original order
///
/// An empty query matches everything.
pub fn filter_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let query = query.to_lowercase();
    posts
        .iter()
        .filter(|post| matches_lowered(post, &query))
        .collect()
}

/// Search state owned by the index view
#[derive(Debug, Clone)]
pub struct SearchState<'a> {
    posts: &'a [Post],
    query: String,
    filtered_posts: Vec<&'a Post>,
}

impl<'a> SearchState<'a> {
    /// Unfiltered state over the full collection
    pub fn new(posts: &'a [Post]) -> Self {
        Self {
            posts,
            query: String::new(),
            filtered_posts: Vec::new(),
        }
    }

    /// Apply an input change, recomputing from the full collection
    pub fn on_input(&mut self, query: &str) {
        self.query = query.to_string();
        self.filtered_posts = if self.query.is_empty() {
            Vec::new()
        } else {
            filter_posts(self.posts, &self.query)
        };
        tracing::debug!(
            query = %self.query,
            matched = self.filtered_posts.len(),
            "search input"
        );
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty()
    }

    /// Matches from the last input; meaningless while unfiltered
    pub fn filtered_posts(&self) -> &[&'a Post] {
        &self.filtered_posts
    }

    /// The posts the view should show right now
    pub fn displayed(&self) -> Vec<&'a Post> {
        if self.is_filtered() {
            self.filtered_posts.clone()
        } else {
            self.posts.iter().collect()
        }
    }
}
