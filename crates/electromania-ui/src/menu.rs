//! Static link lists shared by the navbar and the footer.

use serde::Serialize;

/// A navigation menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Display text
    pub text: &'static str,
    /// Destination path
    pub to: &'static str,
}

/// Entries shown in both the desktop and the mobile menu.
pub const MENU_ITEMS: &[MenuItem] = &[
    MenuItem { text: "Home", to: "/" },
    MenuItem { text: "About", to: "/about" },
    MenuItem { text: "Contact", to: "/contact" },
];

/// A footer quick link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FooterLink {
    pub text: &'static str,
    pub to: &'static str,
}

/// Footer quick links. `/services` and `/privacy` have no page yet.
pub const FOOTER_LINKS: &[FooterLink] = &[
    FooterLink { text: "About Us", to: "/about" },
    FooterLink { text: "Services", to: "/services" },
    FooterLink { text: "Contact", to: "/contact" },
    FooterLink { text: "Privacy Policy", to: "/privacy" },
];

impl MenuItem {
    /// Whether this entry points at `path`.
    ///
    /// Trailing slashes are ignored so that `/about/` (static export) and
    /// `/about` (server) both match.
    pub fn is_active(&self, path: &str) -> bool {
        let path = path.trim_end_matches('/');
        let to = self.to.trim_end_matches('/');
        path == to
    }
}

/// Look up a menu entry by destination path.
pub fn find(to: &str) -> Option<&'static MenuItem> {
    MENU_ITEMS.iter().find(|item| item.is_active(to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_has_three_pages() {
        let paths: Vec<_> = MENU_ITEMS.iter().map(|i| i.to).collect();
        assert_eq!(paths, vec!["/", "/about", "/contact"]);
    }

    #[test]
    fn matches_active_path_ignoring_trailing_slash() {
        let about = &MENU_ITEMS[1];
        assert!(about.is_active("/about"));
        assert!(about.is_active("/about/"));
        assert!(!about.is_active("/contact"));

        let home = &MENU_ITEMS[0];
        assert!(home.is_active("/"));
        assert!(!home.is_active("/about"));
    }

    #[test]
    fn finds_item_by_path() {
        assert_eq!(find("/contact/").map(|i| i.text), Some("Contact"));
        assert!(find("/services").is_none());
    }
}
