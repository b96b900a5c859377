//! Initialize a new handbook site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Handbook Configuration

# Site
title: Handbook
description: ''
author: ''
language: en

# URL
url: http://example.com
root: /

# Directory
source_dir: content
public_dir: public

# Writing
new_post_name: :title.md
default_category: Misc
"#;

const POST_SCAFFOLD: &str = r#"---
path: {{ path }}
title: {{ title }}
date: {{ date }}
author: {{ author }}
category: {{ category }}
---
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("content"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Already initialized: {:?} exists", config_path);
    }
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    fs::write(target_dir.join("scaffolds/post.md"), POST_SCAFFOLD)?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
path: /welcome
title: Welcome
date: {}
category: Getting Started
---

This is the first article of your handbook.

## Writing articles

```bash
$ handbook new "My Article" --category Guides
```

## Building the site

```bash
$ handbook generate
$ handbook server
```
"#,
        today
    );

    fs::write(target_dir.join("content/welcome.md"), sample_post)?;

    Ok(())
}
