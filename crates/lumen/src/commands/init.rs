//! Scaffold a docs project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lumen_config::{doc_sections, CONFIG_FILENAME};
use lumen_content::DOCS_BASE;

/// Run the init command in `root`.
pub async fn run(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing docs project...");

    let docs_dir = root.join(DOCS_BASE);

    if docs_dir.exists() {
        if !yes {
            tracing::warn!(
                "{} already exists. Use --yes to overwrite.",
                docs_dir.display()
            );
            return Ok(());
        }
    } else {
        fs::create_dir_all(&docs_dir).context("Failed to create docs directory")?;
    }

    write_file(&root.join(CONFIG_FILENAME), DEFAULT_CONFIG, yes)?;

    // One directory per sidebar section
    for section in doc_sections() {
        fs::create_dir_all(docs_dir.join(section.id))
            .with_context(|| format!("Failed to create section directory {}", section.id))?;
    }

    let getting_started = docs_dir.join("getting-started");
    write_file(
        &getting_started.join("introduction.md"),
        DEFAULT_INTRODUCTION,
        yes,
    )?;
    write_file(
        &getting_started.join("_template.md"),
        DEFAULT_TEMPLATE,
        yes,
    )?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'lumen check' to validate your pages.");

    Ok(())
}

fn write_file(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Lumen docs configuration

[content]
# Base directory of the docs collection
base = "./src/docs/data/docs"

# Files included in the collection (names starting with _ are always skipped)
pattern = "**/[^_]*{md,mdx}"

# Show draft pages in the sidebar
include_drafts = false
"#;

const DEFAULT_INTRODUCTION: &str = r#"---
title: Introduction
description: What Lumenize is and how these docs are organized
sidebar:
  order: 1
  badge:
    text: Start here
    variant: tip
---

# Introduction

Welcome to the documentation.
"#;

const DEFAULT_TEMPLATE: &str = r#"---
title: Page title
description: One sentence shown in search results
sidebar:
  label: Short label
  order: 10
  hidden: false
tableOfContents:
  minHeadingLevel: 2
  maxHeadingLevel: 3
draft: true
---

Files starting with an underscore are not part of the collection.
Copy this file to start a new page.
"#;
