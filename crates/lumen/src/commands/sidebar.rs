//! Sidebar preview command.

use std::path::Path;

use anyhow::{Context, Result};
use lumen_config::{doc_sections, group, ProjectConfig, Sidebar};

/// Run the sidebar command.
pub async fn run(config_path: &Path, json: bool) -> Result<()> {
    let config = ProjectConfig::load(config_path)?;
    let loader = config
        .docs_loader(super::project_root(config_path))
        .context("Invalid content pattern")?;

    let collection = loader.load()?;
    let sidebar = if config.content.include_drafts {
        group(collection.entries(), doc_sections())
    } else {
        group(collection.published(), doc_sections())
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&sidebar)?);
    } else {
        print!("{}", render(&sidebar));
    }

    Ok(())
}

/// Render the sidebar as an indented outline.
fn render(sidebar: &Sidebar) -> String {
    let mut out = String::new();

    for group in &sidebar.groups {
        out.push_str(group.section.title);
        out.push('\n');
        for page in &group.pages {
            out.push_str(&format!("  {} ({})", page.label, page.id));
            if let Some(badge) = &page.badge {
                out.push_str(&format!(" [{}: {}]", badge.variant, badge.text));
            }
            out.push('\n');
        }
    }

    if !sidebar.unsectioned.is_empty() {
        out.push_str("(no section)\n");
        for page in &sidebar.unsectioned {
            out.push_str(&format!("  {} ({})\n", page.label, page.id));
        }
    }

    out
}
