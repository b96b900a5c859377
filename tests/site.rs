use std::fs;

use handbook::content::{ContentLoader, ContentSource};
use handbook::search::SearchState;
use handbook::Handbook;
use tempfile::TempDir;

fn write_article(site: &TempDir, name: &str, front: &str, body: &str) {
    let path = site.path().join("content").join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("---\n{}\n---\n{}", front, body)).unwrap();
}

fn handbook_site() -> TempDir {
    let site = TempDir::new().unwrap();
    handbook::commands::init::init_site(site.path()).unwrap();
    fs::remove_file(site.path().join("content/welcome.md")).unwrap();

    write_article(
        &site,
        "intro.md",
        "path: /intro\ntitle: Intro\ncategory: Guides\ndate: 2021-01-01",
        "Start here.",
    );
    write_article(
        &site,
        "advanced.md",
        "path: /advanced\ntitle: Advanced\ncategory: Guides\ndate: 2021-02-01",
        "```rust\nfn main() {}\n```",
    );
    write_article(
        &site,
        "misc/faq.md",
        "path: /faq\ntitle: FAQ\ncategory: Misc\ndate: 2021-03-01",
        "<div class=\"callout\">Trusted markup</div>",
    );
    site
}

#[test]
fn generates_index_and_articles() {
    let site = handbook_site();
    let handbook = Handbook::new(site.path()).unwrap();
    handbook.generate().unwrap();

    let public = site.path().join("public");
    let index = fs::read_to_string(public.join("index.html")).unwrap();
    assert!(index.contains(r#"<a href="/">Handbook</a>"#));
    assert!(index.contains(r#"placeholder="Search..""#));
    assert_eq!(index.matches("data-id=").count(), 3);

    let faq = fs::read_to_string(public.join("faq/index.html")).unwrap();
    assert!(faq.contains("<h3>Misc</h3>"));
    assert!(faq.contains("<h4>Last Update:<span>2021-03-01</span></h4>"));
    assert!(faq.contains(r#"<div class="callout">Trusted markup</div>"#));

    let advanced = fs::read_to_string(public.join("advanced/index.html")).unwrap();
    assert!(advanced.contains("highlight rust"));

    handbook.clean().unwrap();
    assert!(!public.exists());
}

#[test]
fn index_search_filters_loaded_posts() {
    let site = handbook_site();
    let handbook = Handbook::new(site.path()).unwrap();
    let posts = ContentLoader::new(&handbook).fetch_posts().unwrap();

    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Advanced", "Intro", "FAQ"]);

    let mut state = SearchState::new(&posts);
    state.on_input("GUIDES");
    let shown: Vec<_> = state.displayed().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(shown, vec!["Advanced", "Intro"]);

    state.on_input("");
    assert_eq!(state.displayed().len(), 3);

    state.on_input("zzz");
    assert!(state.displayed().is_empty());
}

#[test]
fn new_post_appears_in_site() {
    let site = handbook_site();
    let handbook = Handbook::new(site.path()).unwrap();
    handbook.new_post("Release Process", Some("Guides")).unwrap();

    let post = ContentLoader::new(&handbook)
        .fetch_post_by_path("/release-process")
        .unwrap()
        .expect("new post is loadable");
    assert_eq!(post.category.as_deref(), Some("Guides"));
}
