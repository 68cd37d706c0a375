//! Content layer for Lumen documentation pages.
//!
//! This crate extracts YAML front-matter from Markdown/MDX files, validates it
//! against the page schema, and loads the `docs` content collection.

pub mod collection;
pub mod frontmatter;
pub mod pattern;
pub mod schema;

pub use collection::{
    collections, Collection, CollectionError, CollectionLoader, Entry, LoadError, DOCS_BASE,
    DOCS_COLLECTION, DOCS_PATTERN,
};
pub use frontmatter::{extract_frontmatter, FrontmatterError};
pub use pattern::{Pattern, PatternError};
pub use schema::{
    validate, Badge, BadgeVariant, FieldError, Issue, PageFrontMatter, SidebarMeta,
    TableOfContents, ValidationErrors,
};
