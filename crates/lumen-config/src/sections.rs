//! Sidebar sections.
//!
//! Pages are bucketed into a section by the first segment of their id, so a
//! section's `id` doubles as the directory its pages live in.

use std::collections::HashSet;

use serde::Serialize;

use crate::ConfigError;

/// A named group of pages in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocSection {
    /// Unique key pages are bucketed by
    pub id: &'static str,
    /// Display label
    pub title: &'static str,
}

const DOC_SECTIONS: &[DocSection] = &[
    DocSection {
        id: "getting-started",
        title: "Getting Started",
    },
    DocSection {
        id: "hosted-by-lumenize",
        title: "Hosted by Lumenize",
    },
    DocSection {
        id: "self-host-on-cloudflare",
        title: "Self Host on Cloudflare",
    },
    DocSection {
        id: "guides",
        title: "Guides",
    },
    DocSection {
        id: "client-libraries",
        title: "Clients",
    },
    DocSection {
        id: "examples",
        title: "Examples",
    },
    DocSection {
        id: "deployment",
        title: "Deployment",
    },
];

/// Documentation sections, in display order.
pub fn doc_sections() -> &'static [DocSection] {
    DOC_SECTIONS
}

/// Reject section lists that reuse an id.
pub fn check_unique_ids(sections: &[DocSection]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for section in sections {
        if !seen.insert(section.id) {
            return Err(ConfigError::DuplicateSection(section.id.to_string()));
        }
    }
    Ok(())
}
