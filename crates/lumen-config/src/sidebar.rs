//! Sidebar grouping of collection entries.

use std::cmp::Ordering;

use serde::Serialize;

use lumen_content::{Badge, Entry};

use crate::sections::DocSection;

/// A section with the pages bucketed into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarGroup {
    pub section: DocSection,
    pub pages: Vec<SidebarPage>,
}

/// A page as it appears in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarPage {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl SidebarPage {
    fn from_entry(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            label: entry.data.sidebar_label().to_string(),
            order: entry.data.sidebar_order(),
            badge: entry
                .data
                .sidebar
                .as_ref()
                .and_then(|s| s.badge.clone()),
        }
    }
}

/// Result of grouping a set of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sidebar {
    /// One group per section, in section order, including empty ones
    pub groups: Vec<SidebarGroup>,
    /// Pages whose id matches no section
    pub unsectioned: Vec<SidebarPage>,
}

/// Bucket entries into sections.
///
/// Hidden pages are skipped; callers decide whether drafts are passed in.
/// Pages sort by `sidebar.order` (unordered pages last), then by id.
pub fn group<'a>(entries: impl IntoIterator<Item = &'a Entry>, sections: &[DocSection]) -> Sidebar {
    let mut groups: Vec<SidebarGroup> = sections
        .iter()
        .map(|section| SidebarGroup {
            section: *section,
            pages: Vec::new(),
        })
        .collect();
    let mut unsectioned = Vec::new();

    for entry in entries {
        if entry.data.is_hidden() {
            continue;
        }

        let page = SidebarPage::from_entry(entry);
        match groups
            .iter_mut()
            .find(|g| g.section.id == entry.section_id())
        {
            Some(group) => group.pages.push(page),
            None => {
                tracing::warn!(
                    "Page '{}' does not belong to any sidebar section",
                    entry.id
                );
                unsectioned.push(page);
            }
        }
    }

    for group in &mut groups {
        group.pages.sort_by(compare_pages);
    }
    unsectioned.sort_by(compare_pages);

    Sidebar {
        groups,
        unsectioned,
    }
}

fn compare_pages(a: &SidebarPage, b: &SidebarPage) -> Ordering {
    let by_order = match (a.order, b.order) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_order.then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use lumen_content::{extract_frontmatter, validate, BadgeVariant};
    use pretty_assertions::assert_eq;

    fn entry(id: &str, front: &str) -> Entry {
        let source = format!("---\n{}\n---\n", front);
        let (value, _) = extract_frontmatter(&source).unwrap();
        Entry {
            id: id.to_string(),
            path: PathBuf::from(format!("{}.md", id)),
            data: validate(&value).unwrap(),
            body: String::new(),
        }
    }

    fn ids(pages: &[SidebarPage]) -> Vec<&str> {
        pages.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn buckets_by_first_id_segment() {
        let sections = [
            DocSection {
                id: "getting-started",
                title: "Getting Started",
            },
            DocSection {
                id: "guides",
                title: "Guides",
            },
            DocSection {
                id: "examples",
                title: "Examples",
            },
        ];
        let entries = vec![
            entry("guides/routing", "title: Routing"),
            entry("getting-started/introduction", "title: Introduction"),
            entry("guides/auth", "title: Auth"),
            entry("blog/launch", "title: Launch"),
        ];

        let sidebar = group(&entries, &sections);

        assert_eq!(sidebar.groups.len(), 3);
        assert_eq!(ids(&sidebar.groups[0].pages), vec!["getting-started/introduction"]);
        assert_eq!(ids(&sidebar.groups[1].pages), vec!["guides/auth", "guides/routing"]);
        assert!(sidebar.groups[2].pages.is_empty());
        assert_eq!(ids(&sidebar.unsectioned), vec!["blog/launch"]);
    }

    #[test]
    fn sorts_by_order_then_id() {
        let sections = [DocSection {
            id: "guides",
            title: "Guides",
        }];
        let entries = vec![
            entry("guides/c", "title: C"),
            entry("guides/b", "title: B\nsidebar:\n  order: 2"),
            entry("guides/a", "title: A"),
            entry("guides/d", "title: D\nsidebar:\n  order: 1"),
        ];

        let sidebar = group(&entries, &sections);

        assert_eq!(
            ids(&sidebar.groups[0].pages),
            vec!["guides/d", "guides/b", "guides/a", "guides/c"]
        );
    }

    #[test]
    fn skips_hidden_and_uses_labels() {
        let sections = [DocSection {
            id: "guides",
            title: "Guides",
        }];
        let entries = vec![
            entry("guides/secret", "title: Secret\nsidebar:\n  hidden: true"),
            entry(
                "guides/setup",
                "title: Setting things up\nsidebar:\n  label: Setup\n  badge:\n    text: New",
            ),
        ];

        let sidebar = group(&entries, &sections);
        let pages = &sidebar.groups[0].pages;

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].label, "Setup");
        assert_eq!(pages[0].badge.as_ref().unwrap().variant, BadgeVariant::Note);
    }

    #[test]
    fn index_page_belongs_to_its_section() {
        let sections = [DocSection {
            id: "guides",
            title: "Guides",
        }];
        let entries = vec![entry("guides", "title: Guides overview")];

        let sidebar = group(&entries, &sections);

        assert_eq!(ids(&sidebar.groups[0].pages), vec!["guides"]);
    }
}
