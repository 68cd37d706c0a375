//! Content collection loading.
//!
//! A collection pairs a base directory and a glob pattern with the page
//! schema. Every matching Markdown/MDX file becomes an [`Entry`] carrying its
//! id, validated front-matter, and body.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_yaml::Value;
use walkdir::WalkDir;

use crate::frontmatter::{extract_frontmatter, FrontmatterError};
use crate::pattern::{Pattern, PatternError};
use crate::schema::{validate, PageFrontMatter, ValidationErrors};

/// Name the documentation collection is registered under.
pub const DOCS_COLLECTION: &str = "docs";

/// Base directory of the documentation collection.
pub const DOCS_BASE: &str = "./src/docs/data/docs";

/// Files picked up by the documentation collection.
pub const DOCS_PATTERN: &str = "**/[^_]*{md,mdx}";

/// Extensions a collection entry may have.
const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// All collections known to the site.
pub fn collections() -> Vec<CollectionLoader> {
    vec![CollectionLoader::docs()]
}

/// A loaded collection entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Stable id derived from the file path (or the `slug` field)
    pub id: String,

    /// Source file path
    pub path: PathBuf,

    /// Validated front-matter
    pub data: PageFrontMatter,

    /// Document body without the front-matter block
    pub body: String,
}

impl Entry {
    /// First segment of the id, used to bucket pages into sidebar sections.
    pub fn section_id(&self) -> &str {
        self.id.split('/').next().unwrap_or(&self.id)
    }
}

/// Errors for a single collection file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{}: failed to read file: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },

    #[error("{}: {errors}", .path.display())]
    Invalid {
        path: PathBuf,
        errors: ValidationErrors,
    },
}

impl LoadError {
    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Frontmatter { path, .. } | Self::Invalid { path, .. } => {
                path
            }
        }
    }
}

/// Errors that fail a whole collection load.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("Collection base directory not found: {}", .0.display())]
    BaseNotFound(PathBuf),

    #[error("{} invalid file(s) in collection", .0.len())]
    Invalid(Vec<LoadError>),
}

/// Discovers and validates the files of one collection.
#[derive(Debug, Clone)]
pub struct CollectionLoader {
    name: String,
    base: PathBuf,
    pattern: Pattern,
}

impl CollectionLoader {
    /// Create a loader for `base` selecting files with the glob `pattern`.
    pub fn new(
        name: impl Into<String>,
        base: impl Into<PathBuf>,
        pattern: &str,
    ) -> Result<Self, PatternError> {
        Ok(Self {
            name: name.into(),
            base: base.into(),
            pattern: Pattern::new(pattern)?,
        })
    }

    /// The documentation collection.
    pub fn docs() -> Self {
        Self::new(DOCS_COLLECTION, DOCS_BASE, DOCS_PATTERN)
            .expect("Built-in docs pattern must compile")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Lazily load every matching file, in path order.
    ///
    /// Each file is read and validated only when the iterator reaches it. A
    /// missing base directory yields nothing.
    pub fn entries(&self) -> impl Iterator<Item = Result<Entry, LoadError>> + '_ {
        self.candidates()
            .map(move |(path, relative)| self.load_entry(&path, &relative))
    }

    /// Load the whole collection.
    ///
    /// Files are validated in parallel. Loading is all-or-nothing: if any file
    /// fails, every failure is returned and no collection is produced.
    pub fn load(&self) -> Result<Collection, CollectionError> {
        if !self.base.is_dir() {
            return Err(CollectionError::BaseNotFound(self.base.clone()));
        }

        let candidates: Vec<(PathBuf, String)> = self.candidates().collect();
        tracing::debug!(
            "Found {} candidate files for collection '{}'",
            candidates.len(),
            self.name
        );

        let results: Vec<Result<Entry, LoadError>> = candidates
            .par_iter()
            .map(|(path, relative)| self.load_entry(path, relative))
            .collect();

        let mut entries = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(entry) => entries.push(entry),
                Err(e) => failures.push(e),
            }
        }

        if !failures.is_empty() {
            return Err(CollectionError::Invalid(failures));
        }

        Ok(Collection::new(self.name.clone(), entries))
    }

    /// Walk the base directory for files the collection should contain.
    ///
    /// Dot-files and everything below a dot-directory are never visited.
    fn candidates(&self) -> impl Iterator<Item = (PathBuf, String)> + '_ {
        WalkDir::new(&self.base)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_dot_entry(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(move |e| {
                let path = e.into_path();
                let relative = self.relative_path(&path)?;
                self.is_candidate(&path, &relative)
                    .then_some((path, relative))
            })
    }

    fn is_candidate(&self, path: &Path, relative: &str) -> bool {
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if file_name.starts_with('_') {
            return false;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        CONTENT_EXTENSIONS.contains(&ext) && self.pattern.matches(relative)
    }

    /// Path relative to the base, with `/` separators.
    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.base).ok()?;
        let segments = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;
        Some(segments.join("/"))
    }

    fn load_entry(&self, path: &Path, relative: &str) -> Result<Entry, LoadError> {
        let source = fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (data, body) = extract_frontmatter(&source).map_err(|source| {
            LoadError::Frontmatter {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let id = entry_id(relative, &data);

        let front = validate(&data).map_err(|errors| LoadError::Invalid {
            path: path.to_path_buf(),
            errors,
        })?;

        tracing::debug!("Loaded entry '{}' from {}", id, path.display());

        Ok(Entry {
            id,
            path: path.to_path_buf(),
            data: front,
            body: body.to_string(),
        })
    }
}

fn is_dot_entry(entry: &walkdir::DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// A fully loaded and validated collection.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    name: String,
    entries: Vec<Entry>,
}

impl Collection {
    /// Build a collection from entries in load order.
    ///
    /// When two entries share an id the later one replaces the earlier, which
    /// keeps its position.
    pub fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        let name = name.into();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut unique: Vec<Entry> = Vec::with_capacity(entries.len());

        for entry in entries {
            match positions.get(&entry.id) {
                Some(&index) => {
                    tracing::warn!(
                        "Duplicate id '{}' in collection '{}': {} replaces {}",
                        entry.id,
                        name,
                        entry.path.display(),
                        unique[index].path.display()
                    );
                    unique[index] = entry;
                }
                None => {
                    positions.insert(entry.id.clone(), unique.len());
                    unique.push(entry);
                }
            }
        }

        Self {
            name,
            entries: unique,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries that are not drafts.
    pub fn published(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.data.is_draft())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute the id of an entry.
///
/// A string `slug` in the raw front-matter wins. Otherwise the id is the
/// relative path without its extension, each segment slugged, with a trailing
/// `/index` removed.
pub fn entry_id(relative: &str, data: &Value) -> String {
    if let Some(slug) = data.get("slug").and_then(Value::as_str) {
        return slug.to_string();
    }

    let without_ext = match relative.rfind('.') {
        Some(dot) if !relative[dot..].contains('/') => &relative[..dot],
        _ => relative,
    };

    let id = without_ext
        .split('/')
        .map(slug_segment)
        .collect::<Vec<_>>()
        .join("/");

    match id.strip_suffix("/index") {
        Some(stripped) => stripped.to_string(),
        None => id,
    }
}

/// Slug one path segment: lowercase, spaces become `-`, and only
/// alphanumerics, `-` and `_` are kept.
fn slug_segment(segment: &str) -> String {
    segment
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_yaml::Mapping;
    use tempfile::tempdir;

    fn write(base: &Path, relative: &str, content: &str) {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn loader(base: &Path) -> CollectionLoader {
        CollectionLoader::new(DOCS_COLLECTION, base, DOCS_PATTERN).unwrap()
    }

    fn empty() -> Value {
        Value::Mapping(Mapping::new())
    }

    #[test]
    fn loads_matching_files_with_ids() {
        let temp = tempdir().unwrap();
        let base = temp.path();
        write(base, "getting-started/introduction.md", "---\ntitle: Introduction\n---\n# Hi\n");
        write(base, "guides/index.mdx", "---\ntitle: Guides\n---\n");
        write(base, "guides/Writing Docs.md", "---\ntitle: Writing\n---\n");
        write(base, "guides/diagram.png", "not markdown");

        let collection = loader(base).load().unwrap();
        let ids: Vec<_> = collection.entries().iter().map(|e| e.id.as_str()).collect();

        assert_eq!(
            ids,
            vec!["getting-started/introduction", "guides/writing-docs", "guides"]
        );

        let intro = collection.get("getting-started/introduction").unwrap();
        assert_eq!(intro.data.title, "Introduction");
        assert_eq!(intro.body, "# Hi\n");
        assert_eq!(intro.section_id(), "getting-started");
    }

    #[test]
    fn excludes_underscore_files() {
        let temp = tempdir().unwrap();
        let base = temp.path();
        write(base, "guides/page.md", "---\ntitle: Page\n---\n");
        write(base, "guides/_draft.md", "not even valid front-matter");
        write(base, "guides/_partial.mdx", "---\n---\n");
        write(base, "_top.md", "---\ntitle: [broken\n---\n");

        let collection = loader(base).load().unwrap();

        assert_eq!(collection.len(), 1);
        assert!(collection.get("guides/page").is_some());
    }

    #[test]
    fn underscore_exclusion_ignores_pattern() {
        let temp = tempdir().unwrap();
        let base = temp.path();
        write(base, "_hidden.md", "---\ntitle: Hidden\n---\n");
        write(base, "shown.md", "---\ntitle: Shown\n---\n");

        let loader = CollectionLoader::new("all", base, "**/*").unwrap();
        let ids: Vec<_> = loader.entries().map(|e| e.unwrap().id).collect();

        assert_eq!(ids, vec!["shown"]);
    }

    #[test]
    fn load_reports_every_invalid_file() {
        let temp = tempdir().unwrap();
        let base = temp.path();
        write(base, "a.md", "---\ntitle: Fine\n---\n");
        write(base, "b.md", "---\ndescription: no title\n---\n");
        write(base, "c.md", "---\ntitle: [unclosed\n---\n");
        write(base, "d.md", "---\ntitle: Bad badge\nsidebar:\n  badge:\n    text: x\n    variant: loud\n---\n");

        let Err(CollectionError::Invalid(failures)) = loader(base).load() else {
            panic!("expected invalid collection");
        };

        let names: Vec<_> = failures
            .iter()
            .map(|f| f.path().file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["b.md", "c.md", "d.md"]);

        assert!(matches!(failures[1], LoadError::Frontmatter { .. }));
        match &failures[2] {
            LoadError::Invalid { errors, .. } => {
                assert!(errors.at("sidebar.badge.variant").is_some());
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn entries_continue_past_failures() {
        let temp = tempdir().unwrap();
        let base = temp.path();
        write(base, "a.md", "no front-matter at all");
        write(base, "b.md", "---\ntitle: Fine\n---\n");

        let results: Vec<_> = loader(base).entries().collect();

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(LoadError::Invalid { .. })));
        assert_eq!(results[1].as_ref().unwrap().id, "b");
    }

    #[test]
    fn missing_base_directory() {
        let temp = tempdir().unwrap();
        let loader = loader(&temp.path().join("nope"));

        assert!(matches!(
            loader.load(),
            Err(CollectionError::BaseNotFound(_))
        ));
        assert_eq!(loader.entries().count(), 0);
    }

    #[test]
    fn slug_overrides_id_and_later_duplicate_wins() {
        let temp = tempdir().unwrap();
        let base = temp.path();
        write(base, "a.md", "---\ntitle: First\nslug: shared\n---\n");
        write(base, "b.md", "---\ntitle: Second\nslug: shared\n---\n");
        write(base, "c.md", "---\ntitle: Third\n---\n");

        let collection = loader(base).load().unwrap();
        let ids: Vec<_> = collection.entries().iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, vec!["shared", "c"]);
        let shared = collection.get("shared").unwrap();
        assert_eq!(shared.data.title, "Second");
        assert!(shared.path.ends_with("b.md"));
    }

    #[test]
    fn skips_dot_files_and_directories() {
        let temp = tempdir().unwrap();
        let base = temp.path();
        write(base, "page.md", "---\ntitle: Page\n---\n");
        write(base, ".hidden.md", "no front-matter");
        write(base, ".obsidian/scratch.md", "no front-matter");
        write(base, "guides/.drafts/wip.mdx", "---\n---\n");

        let ids: Vec<_> = loader(base).entries().map(|e| e.unwrap().id).collect();
        assert_eq!(ids, vec!["page"]);

        let collection = loader(base).load().unwrap();
        assert_eq!(collection.len(), 1);
        assert!(collection.get("page").is_some());
    }

    #[test]
    fn dot_base_directory_is_walked() {
        let temp = tempdir().unwrap();
        let base = temp.path().join(".content");
        write(&base, "page.md", "---\ntitle: Page\n---\n");

        let collection = loader(&base).load().unwrap();

        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn published_skips_drafts() {
        let temp = tempdir().unwrap();
        let base = temp.path();
        write(base, "done.md", "---\ntitle: Done\n---\n");
        write(base, "wip.md", "---\ntitle: WIP\ndraft: true\n---\n");

        let collection = loader(base).load().unwrap();
        let published: Vec<_> = collection.published().map(|e| e.id.as_str()).collect();

        assert_eq!(collection.len(), 2);
        assert_eq!(published, vec!["done"]);
    }

    #[test]
    fn generates_ids() {
        assert_eq!(entry_id("intro.md", &empty()), "intro");
        assert_eq!(entry_id("index.md", &empty()), "index");
        assert_eq!(entry_id("guides/index.mdx", &empty()), "guides");
        assert_eq!(entry_id("Guides/Hello World!.md", &empty()), "guides/hello-world");
        assert_eq!(entry_id("v1.2/notes_draft.md", &empty()), "v12/notes_draft");
    }

    #[test]
    fn registers_docs_collection() {
        let registered = collections();

        assert_eq!(registered.len(), 1);
        assert_eq!(registered[0].name(), "docs");
        assert_eq!(registered[0].base(), Path::new("./src/docs/data/docs"));
        assert_eq!(registered[0].pattern().as_str(), "**/[^_]*{md,mdx}");
    }
}
