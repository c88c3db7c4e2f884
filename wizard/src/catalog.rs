//! Page catalog: the fixed, ordered set of pages a gift can contain.
//!
//! DESIGN
//! ======
//! The catalog is a process-wide constant. Its order is the display order
//! for everything derived from it: wizard steps, page manager rows, and the
//! preview. `page-1` is the access gate. Setup edits it, so it is always
//! present and never gets a step of its own.

use serde::{Deserialize, Serialize};

/// Semantic type of a catalog page. Also the section name used by field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Login,
    Greeting,
    Music,
    Wrapped,
    Quiz,
    Gallery,
    Map,
    Letter,
    Lock,
    Infinity,
}

impl PageKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Greeting => "greeting",
            Self::Music => "music",
            Self::Wrapped => "wrapped",
            Self::Quiz => "quiz",
            Self::Gallery => "gallery",
            Self::Map => "map",
            Self::Letter => "letter",
            Self::Lock => "lock",
            Self::Infinity => "infinity",
        }
    }

    /// Parse a section name. `login` is excluded: that name belongs to the
    /// typed login settings, not a page section.
    #[must_use]
    pub fn from_section(raw: &str) -> Option<Self> {
        match raw {
            "greeting" => Some(Self::Greeting),
            "music" => Some(Self::Music),
            "wrapped" => Some(Self::Wrapped),
            "quiz" => Some(Self::Quiz),
            "gallery" => Some(Self::Gallery),
            "map" => Some(Self::Map),
            "letter" => Some(Self::Letter),
            "lock" => Some(Self::Lock),
            "infinity" => Some(Self::Infinity),
            _ => None,
        }
    }
}

/// One entry in the page catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    /// Stable identifier, e.g. `"page-2"`.
    pub id: &'static str,
    /// Semantic type tag.
    pub kind: PageKind,
    /// Display name shown in the sidebar and page manager.
    pub name: &'static str,
    /// Material Symbols icon name.
    pub icon: &'static str,
}

impl PageDescriptor {
    /// Whether the page manager may switch this page on and off.
    #[must_use]
    pub fn is_toggleable(&self) -> bool {
        self.kind != PageKind::Login
    }
}

pub const PAGE_CATALOG: [PageDescriptor; 10] = [
    PageDescriptor { id: "page-1", kind: PageKind::Login, name: "Private Access", icon: "lock_open" },
    PageDescriptor { id: "page-2", kind: PageKind::Greeting, name: "Greeting Card", icon: "favorite" },
    PageDescriptor { id: "page-3", kind: PageKind::Music, name: "Music Player", icon: "library_music" },
    PageDescriptor { id: "page-4", kind: PageKind::Wrapped, name: "Our Vibe", icon: "auto_awesome" },
    PageDescriptor { id: "page-5", kind: PageKind::Quiz, name: "Love Quiz", icon: "quiz" },
    PageDescriptor { id: "page-6", kind: PageKind::Gallery, name: "Photo Gallery", icon: "photo_library" },
    PageDescriptor { id: "page-7", kind: PageKind::Map, name: "Our Journey", icon: "location_on" },
    PageDescriptor { id: "page-8", kind: PageKind::Letter, name: "Love Letter", icon: "history_edu" },
    PageDescriptor { id: "page-9", kind: PageKind::Lock, name: "Final Lock", icon: "lock" },
    PageDescriptor { id: "page-10", kind: PageKind::Infinity, name: "Infinity Scroll", icon: "all_inclusive" },
];

/// The catalog's first page. Setup previews as this page.
#[must_use]
pub fn first_page() -> &'static PageDescriptor {
    &PAGE_CATALOG[0]
}

/// Look up a page by identifier.
#[must_use]
pub fn find(id: &str) -> Option<&'static PageDescriptor> {
    PAGE_CATALOG.iter().find(|p| p.id == id)
}

/// Look up the first page carrying the given semantic type.
#[must_use]
pub fn find_by_kind(kind: PageKind) -> Option<&'static PageDescriptor> {
    PAGE_CATALOG.iter().find(|p| p.kind == kind)
}

/// Pages the operator can switch on and off, in catalog order.
pub fn toggleable() -> impl Iterator<Item = &'static PageDescriptor> {
    PAGE_CATALOG.iter().filter(|p| p.is_toggleable())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
