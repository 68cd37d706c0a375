//! Site-wide metadata.

use serde::Serialize;

/// Metadata shared by every page of the docs site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteData {
    pub title: &'static str,
    pub description: &'static str,
    /// Social links shown in the header
    pub nav_socials: &'static [SocialLink],
    /// Social links shown in the footer
    pub footer_socials: &'static [SocialLink],
    /// Social card image for pages without their own
    pub default_image: Image,
    pub author: Author,
}

/// A link to a social profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    /// Name of the network
    pub social: &'static str,
    pub link: &'static str,
    /// Icon name, e.g. `tabler/brand-x`
    pub icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: &'static str,
    pub alt: &'static str,
}

/// Site author, used for SEO metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: &'static str,
    pub email: &'static str,
    pub twitter: &'static str,
}

static SITE_DATA: SiteData = SiteData {
    title: "Lumenize",
    description:
        "A modern, fast, and feature-rich documentation theme built with Astro v5 and Tailwind CSS v4.",
    nav_socials: &[
        SocialLink {
            social: "X formerly known as Twitter",
            link: "https://x.com/BowTiedWebReapr",
            icon: "tabler/brand-x",
        },
        SocialLink {
            social: "GitHub",
            link: "https://github.com/Boston343",
            icon: "mdi/github",
        },
    ],
    footer_socials: &[
        SocialLink {
            social: "X formerly known as Twitter",
            link: "https://x.com/BowTiedWebReapr",
            icon: "tabler/brand-x",
        },
        SocialLink {
            social: "Threads",
            link: "https://www.threads.net/@bowtiedwebreaper",
            icon: "tabler/brand-threads",
        },
        SocialLink {
            social: "BlueSky",
            link: "https://bsky.app/profile/webreaper.dev",
            icon: "tabler/brand-bluesky",
        },
        SocialLink {
            social: "GitHub",
            link: "https://github.com/Boston343",
            icon: "tabler/brand-github",
        },
    ],
    default_image: Image {
        src: "/images/lumenize-logo.png",
        alt: "Lumenize logo",
    },
    author: Author {
        name: "Larry Maccherone",
        email: "email@lumenize.com",
        twitter: "Lumenize",
    },
};

/// The docs site metadata.
pub fn site_data() -> &'static SiteData {
    &SITE_DATA
}
