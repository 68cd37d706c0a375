//! Collection validation command.

use std::path::Path;

use anyhow::{Context, Result};
use lumen_config::{check_unique_ids, doc_sections, group, ProjectConfig};
use lumen_content::{CollectionError, CollectionLoader, LoadError};

use crate::watcher::FileWatcher;

/// Summary of a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Entries in the collection
    pub entries: usize,
    /// Entries marked as drafts
    pub drafts: usize,
    /// Entries left out of the search index (`pagefind: false`)
    pub unsearchable: usize,
    /// Published entries that match no sidebar section
    pub unsectioned: usize,
}

/// Run the check command.
pub async fn run(config_path: &Path, watch: bool) -> Result<()> {
    let config = ProjectConfig::load(config_path)?;
    let loader = config
        .docs_loader(super::project_root(config_path))
        .context("Invalid content pattern")?;

    check_unique_ids(doc_sections())?;

    if !watch {
        check_once(&loader, config.content.include_drafts)?;
        return Ok(());
    }

    if let Err(e) = check_once(&loader, config.content.include_drafts) {
        tracing::error!("{:#}", e);
    }

    let (_watcher, mut rx) = FileWatcher::new(&[loader.base().to_path_buf()])
        .context("Failed to start file watcher")?;
    tracing::info!("Watching {} for changes...", loader.base().display());

    while let Some(event) = rx.recv().await {
        if !event.affects_content() {
            continue;
        }
        tracing::debug!("Change detected: {:?}", event);

        if let Err(e) = check_once(&loader, config.content.include_drafts) {
            tracing::error!("{:#}", e);
        }
    }

    Ok(())
}

/// Validate the collection once, logging every problem found.
pub fn check_once(loader: &CollectionLoader, include_drafts: bool) -> Result<Report> {
    tracing::info!(
        "Checking collection '{}' in {}",
        loader.name(),
        loader.base().display()
    );

    let collection = match loader.load() {
        Ok(collection) => collection,
        Err(CollectionError::Invalid(failures)) => {
            for failure in &failures {
                log_failure(failure);
            }
            anyhow::bail!("{} invalid file(s) in collection '{}'", failures.len(), loader.name());
        }
        Err(e) => return Err(e.into()),
    };

    let drafts = collection.entries().iter().filter(|e| e.data.is_draft()).count();
    let unsearchable = collection
        .entries()
        .iter()
        .filter(|e| !e.data.is_searchable())
        .count();
    let sidebar = if include_drafts {
        group(collection.entries(), doc_sections())
    } else {
        group(collection.published(), doc_sections())
    };

    for section in &sidebar.groups {
        tracing::debug!("{}: {} page(s)", section.section.title, section.pages.len());
    }

    let report = Report {
        entries: collection.len(),
        drafts,
        unsearchable,
        unsectioned: sidebar.unsectioned.len(),
    };

    tracing::info!(
        "{} entries valid ({} drafts, {} outside any section)",
        report.entries,
        report.drafts,
        report.unsectioned
    );
    if report.unsearchable > 0 {
        tracing::debug!("{} entries excluded from search", report.unsearchable);
    }

    Ok(report)
}

fn log_failure(failure: &LoadError) {
    match failure {
        LoadError::Invalid { path, errors } => {
            for error in errors.errors() {
                tracing::error!("{}: {}", path.display(), error);
            }
        }
        other => tracing::error!("{}", other),
    }
}
