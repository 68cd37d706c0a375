//! Front-matter schema for documentation pages.
//!
//! Validation walks a parsed YAML value field by field and collects every
//! problem it finds, so a single run reports all offending fields of a page.
//! Unknown fields are ignored.

use std::fmt;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// Smallest heading level accepted by `tableOfContents`.
pub const HEADING_LEVEL_MIN: f64 = 1.0;

/// Largest heading level accepted by `tableOfContents`.
pub const HEADING_LEVEL_MAX: f64 = 6.0;

/// Heading level the table of contents starts at when not configured.
pub const DEFAULT_MIN_HEADING_LEVEL: f64 = 2.0;

/// Heading level the table of contents stops at when not configured.
pub const DEFAULT_MAX_HEADING_LEVEL: f64 = 3.0;

/// Validated front-matter of a documentation page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFrontMatter {
    /// Page title (required)
    pub title: String,

    /// Page description for SEO
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sidebar placement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<SidebarMeta>,

    /// Table of contents heading bounds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_of_contents: Option<TableOfContents>,

    /// Whether the page is included in the search index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagefind: Option<bool>,

    /// Key used to map this page onto its translations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_key: Option<String>,

    /// Draft pages are left out of published output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
}

impl PageFrontMatter {
    /// Whether the page is marked as a draft.
    pub fn is_draft(&self) -> bool {
        self.draft.unwrap_or(false)
    }

    /// Whether the page is hidden from the sidebar.
    pub fn is_hidden(&self) -> bool {
        self.sidebar
            .as_ref()
            .and_then(|s| s.hidden)
            .unwrap_or(false)
    }

    /// Whether the page should be indexed for search.
    pub fn is_searchable(&self) -> bool {
        self.pagefind.unwrap_or(true)
    }

    /// Label shown in the sidebar, falling back to the title.
    pub fn sidebar_label(&self) -> &str {
        self.sidebar
            .as_ref()
            .and_then(|s| s.label.as_deref())
            .unwrap_or(&self.title)
    }

    /// Sort key within a sidebar section.
    pub fn sidebar_order(&self) -> Option<f64> {
        self.sidebar.as_ref().and_then(|s| s.order)
    }
}

/// Sidebar placement of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SidebarMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Lower sorts first; pages without an order sort last
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

/// A small labeled tag shown next to a sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: String,
    pub variant: BadgeVariant,
}

/// Visual style of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Note,
    Tip,
    Caution,
    Danger,
    Info,
}

impl BadgeVariant {
    /// Accepted variant names, in declaration order.
    pub const NAMES: &'static [&'static str] = &["note", "tip", "caution", "danger", "info"];

    /// Parse a variant from its front-matter name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "note" => Some(Self::Note),
            "tip" => Some(Self::Tip),
            "caution" => Some(Self::Caution),
            "danger" => Some(Self::Danger),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Caution => "caution",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for BadgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heading levels included in a page's table of contents.
///
/// Levels are plain numbers; any value in `[1, 6]` is accepted, fractional
/// ones included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOfContents {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_heading_level: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heading_level: Option<f64>,
}

impl TableOfContents {
    /// Resolve missing levels against the defaults.
    ///
    /// A lone bound that falls outside the default window pulls the other
    /// default along with it, so the result is never inverted.
    pub fn bounds(&self) -> (f64, f64) {
        match (self.min_heading_level, self.max_heading_level) {
            (Some(min), Some(max)) => (min, max),
            (Some(min), None) => (min, DEFAULT_MAX_HEADING_LEVEL.max(min)),
            (None, Some(max)) => (DEFAULT_MIN_HEADING_LEVEL.min(max), max),
            (None, None) => (DEFAULT_MIN_HEADING_LEVEL, DEFAULT_MAX_HEADING_LEVEL),
        }
    }
}

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    /// A required field is absent.
    Required,

    /// The field holds a value of the wrong type.
    InvalidType {
        expected: &'static str,
        received: &'static str,
    },

    /// The field holds a string outside the allowed set.
    InvalidEnum {
        options: &'static [&'static str],
        received: String,
    },

    /// A number below its lower bound.
    TooSmall { minimum: f64 },

    /// A number above its upper bound.
    TooBig { maximum: f64 },

    /// `minHeadingLevel` is greater than `maxHeadingLevel`.
    InvertedRange { min: f64, max: f64 },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::InvalidType { expected, received } => {
                write!(f, "expected {}, received {}", expected, received)
            }
            Self::InvalidEnum { options, received } => write!(
                f,
                "invalid value '{}', expected one of {}",
                received,
                options.join(" | ")
            ),
            Self::TooSmall { minimum } => {
                write!(f, "number must be greater than or equal to {}", minimum)
            }
            Self::TooBig { maximum } => {
                write!(f, "number must be less than or equal to {}", maximum)
            }
            Self::InvertedRange { min, max } => write!(
                f,
                "minHeadingLevel ({}) must not exceed maxHeadingLevel ({})",
                min, max
            ),
        }
    }
}

/// A validation problem located at a dotted field path.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Dotted path, e.g. `sidebar.badge.variant`; empty for the root
    pub path: String,
    pub issue: Issue,
}

impl FieldError {
    pub fn new(path: impl Into<String>, issue: Issue) -> Self {
        Self {
            path: path.into(),
            issue,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.issue)
        } else {
            write!(f, "{}: {}", self.path, self.issue)
        }
    }
}

/// All problems found in one front-matter block.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Find the first error reported at `path`.
    pub fn at(&self, path: &str) -> Option<&Issue> {
        self.0.iter().find(|e| e.path == path).map(|e| &e.issue)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a parsed front-matter value against the page schema.
pub fn validate(value: &Value) -> Result<PageFrontMatter, ValidationErrors> {
    let mut v = Validator::default();

    let Some(root) = v.object(value, "") else {
        return Err(ValidationErrors(v.errors));
    };

    let title = v.required_string(root, "", "title");
    let description = v.string(root, "", "description");
    let sidebar = v.sidebar(root);
    let table_of_contents = v.table_of_contents(root);
    let pagefind = v.boolean(root, "", "pagefind");
    let mapping_key = v.string(root, "", "mappingKey");
    let draft = v.boolean(root, "", "draft");

    match title {
        Some(title) if v.errors.is_empty() => Ok(PageFrontMatter {
            title,
            description,
            sidebar,
            table_of_contents,
            pagefind,
            mapping_key,
            draft,
        }),
        _ => Err(ValidationErrors(v.errors)),
    }
}

/// Collects field errors while walking a front-matter value.
#[derive(Default)]
struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    fn push(&mut self, path: String, issue: Issue) {
        self.errors.push(FieldError { path, issue });
    }

    fn object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Mapping> {
        match untag(value) {
            Value::Mapping(map) => Some(map),
            other => {
                self.push(
                    path.to_string(),
                    Issue::InvalidType {
                        expected: "object",
                        received: type_name(other),
                    },
                );
                None
            }
        }
    }

    fn optional_object<'a>(
        &mut self,
        map: &'a Mapping,
        parent: &str,
        key: &str,
    ) -> Option<&'a Mapping> {
        let value = map.get(key)?;
        self.object(value, &join(parent, key))
    }

    fn required_string(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<String> {
        if map.get(key).is_none() {
            self.push(join(parent, key), Issue::Required);
            return None;
        }
        self.string(map, parent, key)
    }

    fn string(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<String> {
        match untag(map.get(key)?) {
            Value::String(s) => Some(s.clone()),
            other => {
                self.push(
                    join(parent, key),
                    Issue::InvalidType {
                        expected: "string",
                        received: type_name(other),
                    },
                );
                None
            }
        }
    }

    fn boolean(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<bool> {
        match untag(map.get(key)?) {
            Value::Bool(b) => Some(*b),
            other => {
                self.push(
                    join(parent, key),
                    Issue::InvalidType {
                        expected: "boolean",
                        received: type_name(other),
                    },
                );
                None
            }
        }
    }

    fn number(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<f64> {
        let received = match untag(map.get(key)?) {
            Value::Number(n) => match n.as_f64() {
                Some(f) if !f.is_nan() => return Some(f),
                _ => "nan",
            },
            other => type_name(other),
        };
        self.push(
            join(parent, key),
            Issue::InvalidType {
                expected: "number",
                received,
            },
        );
        None
    }

    fn heading_level(&mut self, map: &Mapping, parent: &str, key: &str) -> Option<f64> {
        let level = self.number(map, parent, key)?;
        let path = join(parent, key);

        if level < HEADING_LEVEL_MIN {
            self.push(
                path,
                Issue::TooSmall {
                    minimum: HEADING_LEVEL_MIN,
                },
            );
            return None;
        }
        if level > HEADING_LEVEL_MAX {
            self.push(
                path,
                Issue::TooBig {
                    maximum: HEADING_LEVEL_MAX,
                },
            );
            return None;
        }

        Some(level)
    }

    fn sidebar(&mut self, root: &Mapping) -> Option<SidebarMeta> {
        let sidebar = self.optional_object(root, "", "sidebar")?;

        Some(SidebarMeta {
            label: self.string(sidebar, "sidebar", "label"),
            order: self.number(sidebar, "sidebar", "order"),
            hidden: self.boolean(sidebar, "sidebar", "hidden"),
            badge: self.badge(sidebar),
        })
    }

    fn badge(&mut self, sidebar: &Mapping) -> Option<Badge> {
        let badge = self.optional_object(sidebar, "sidebar", "badge")?;

        let text = self.required_string(badge, "sidebar.badge", "text");
        let variant = self.badge_variant(badge);

        Some(Badge {
            text: text?,
            variant: variant?,
        })
    }

    fn badge_variant(&mut self, badge: &Mapping) -> Option<BadgeVariant> {
        let path = "sidebar.badge.variant";

        let Some(value) = badge.get("variant") else {
            return Some(BadgeVariant::default());
        };

        match untag(value) {
            Value::String(name) => {
                let variant = BadgeVariant::from_name(name);
                if variant.is_none() {
                    self.push(
                        path.to_string(),
                        Issue::InvalidEnum {
                            options: BadgeVariant::NAMES,
                            received: name.clone(),
                        },
                    );
                }
                variant
            }
            other => {
                self.push(
                    path.to_string(),
                    Issue::InvalidType {
                        expected: "string",
                        received: type_name(other),
                    },
                );
                None
            }
        }
    }

    fn table_of_contents(&mut self, root: &Mapping) -> Option<TableOfContents> {
        let toc = self.optional_object(root, "", "tableOfContents")?;

        let min_heading_level = self.heading_level(toc, "tableOfContents", "minHeadingLevel");
        let max_heading_level = self.heading_level(toc, "tableOfContents", "maxHeadingLevel");

        if let (Some(min), Some(max)) = (min_heading_level, max_heading_level) {
            if min > max {
                self.push(
                    "tableOfContents".to_string(),
                    Issue::InvertedRange { min, max },
                );
            }
        }

        Some(TableOfContents {
            min_heading_level,
            max_heading_level,
        })
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "array",
        Value::Mapping(_) => "object",
        Value::Tagged(tagged) => type_name(&tagged.value),
    }
}
