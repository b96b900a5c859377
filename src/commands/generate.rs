//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::path::Path;
use std::time::Duration;

use crate::content::{ContentLoader, ContentSource};
use crate::generator::Generator;
use crate::Handbook;

/// Generate the static site
pub fn run(handbook: &Handbook) -> Result<()> {
    let start = std::time::Instant::now();

    let posts = ContentLoader::new(handbook).fetch_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    let generator = Generator::new(handbook)?;
    generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Reload `_config.yml` from the site directory and generate again
pub fn rebuild(base_dir: &Path) -> Result<Handbook> {
    let handbook = Handbook::new(base_dir)?;
    run(&handbook)?;
    Ok(handbook)
}

/// Watch for file changes and regenerate
pub async fn watch(handbook: &Handbook) -> Result<()> {
    let handbook = handbook.clone();
    tokio::task::spawn_blocking(move || watch_blocking(&handbook, || {})).await?
}

/// Rebuild on debounced changes, calling `on_rebuilt` after each successful build
///
/// Every event within the debounce window is coalesced into one rebuild, and
/// the rebuild reads the config again so title and directory edits apply.
/// Blocks until the watcher shuts down.
pub fn watch_blocking<F: FnMut()>(handbook: &Handbook, mut on_rebuilt: F) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if handbook.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&handbook.source_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", handbook.source_dir);
    }

    let config_path = handbook.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| is_relevant_change(&e.path))
                    .collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                match rebuild(&handbook.base_dir) {
                    Ok(_) => {
                        tracing::info!("Regenerated");
                        on_rebuilt();
                    }
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

/// Editor swap files and VCS internals never trigger a rebuild
pub(crate) fn is_relevant_change(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_rebuild_reloads_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("_config.yml"), "title: Before\n").unwrap();
        fs::create_dir_all(tmp.path().join("content")).unwrap();
        fs::write(
            tmp.path().join("content/intro.md"),
            "---\npath: /intro\ntitle: Intro\n---\nHello.",
        )
        .unwrap();

        let handbook = Handbook::new(tmp.path()).unwrap();
        run(&handbook).unwrap();
        let index = fs::read_to_string(handbook.public_dir.join("index.html")).unwrap();
        assert!(index.contains(">Before</a>"));

        fs::write(tmp.path().join("_config.yml"), "title: After\n").unwrap();
        let reloaded = rebuild(&handbook.base_dir).unwrap();

        assert_eq!(reloaded.config.site_title(), "After");
        let index = fs::read_to_string(reloaded.public_dir.join("index.html")).unwrap();
        assert!(index.contains(">After</a>"));
        assert!(!index.contains(">Before</a>"));
    }

    #[test]
    fn test_is_relevant_change() {
        assert!(is_relevant_change(Path::new("content/intro.md")));
        assert!(!is_relevant_change(Path::new("content/.git/index")));
        assert!(!is_relevant_change(Path::new("content/intro.md~")));
        assert!(!is_relevant_change(Path::new("content/.intro.md.swp")));
    }
}
