//! Static configuration dump command.

use anyhow::Result;
use clap::ValueEnum;
use lumen_config::{doc_sections, nav_items, site_data};
use serde_json::{json, Value};

/// Which part of the configuration to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Part {
    Nav,
    Sections,
    Site,
}

/// Run the config command.
pub async fn run(part: Option<Part>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&snapshot(part)?)?);
    Ok(())
}

fn snapshot(part: Option<Part>) -> Result<Value> {
    let value = match part {
        Some(Part::Nav) => serde_json::to_value(nav_items())?,
        Some(Part::Sections) => serde_json::to_value(doc_sections())?,
        Some(Part::Site) => serde_json::to_value(site_data())?,
        None => json!({
            "nav": nav_items(),
            "sections": doc_sections(),
            "site": site_data(),
        }),
    };
    Ok(value)
}
