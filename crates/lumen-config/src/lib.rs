//! Static configuration for the Lumen docs site.
//!
//! Navigation links, sidebar sections and site metadata are fixed at compile
//! time and exposed through plain accessors. The [`project`] module loads the
//! `docs.toml` file that points the content collection at its sources.

use std::path::PathBuf;

pub mod nav;
pub mod project;
pub mod sections;
pub mod sidebar;
pub mod site;

pub use nav::{nav_items, NavItem};
pub use project::{ContentConfig, ProjectConfig, CONFIG_FILENAME};
pub use sections::{check_unique_ids, doc_sections, DocSection};
pub use sidebar::{group, Sidebar, SidebarGroup, SidebarPage};
pub use site::{site_data, Author, Image, SiteData, SocialLink};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Duplicate sidebar section id: {0}")]
    DuplicateSection(String),
}
