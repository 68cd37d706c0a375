//! Top-level navigation links.

use serde::Serialize;

/// A link in the site header navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub text: &'static str,
    pub link: &'static str,
    /// Open the link in a new browser tab
    #[serde(skip_serializing_if = "is_false")]
    pub new_tab: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        text: "Introduction",
        link: "/docs/getting-started/",
        new_tab: false,
    },
    NavItem {
        text: "Get Lumenize",
        link: "https://cosmicthemes.com/themes/pathfinder",
        new_tab: true,
    },
];

/// Navigation links, in display order.
pub fn nav_items() -> &'static [NavItem] {
    NAV_ITEMS
}
