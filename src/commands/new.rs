//! Create a new handbook article

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Handbook;

/// Create a new article file and return its location
pub fn create_post(
    handbook: &Handbook,
    title: &str,
    category: Option<&str>,
    path: Option<&str>,
) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);

    fs::create_dir_all(&handbook.source_dir)?;

    let filename = handbook
        .config
        .new_post_name
        .replace(":title", &slug)
        .replace(":year", &now.format("%Y").to_string())
        .replace(":month", &now.format("%m").to_string())
        .replace(":day", &now.format("%d").to_string());
    let file_path = handbook.source_dir.join(filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold_path = handbook.base_dir.join("scaffolds/post.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        "---\npath: {{ path }}\ntitle: {{ title }}\ndate: {{ date }}\ncategory: {{ category }}\n---\n"
            .to_string()
    };

    let route = path
        .map(crate::content::normalize_path)
        .unwrap_or_else(|| format!("/{}", slug));
    let category = category.unwrap_or(handbook.config.default_category.as_str());

    let content = scaffold
        .replace("{{ path }}", &route)
        .replace("{{ title }}", &yaml_string(title))
        .replace("{{ date }}", &now.format("%Y-%m-%d").to_string())
        .replace("{{ author }}", &yaml_string(&handbook.config.author))
        .replace("{{ category }}", &yaml_string(category));

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a scalar so titles like "FAQ: billing" stay valid YAML
fn yaml_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
