//! The page entity.

/// A wiki page: the unit of stored content.
///
/// A page is keyed by its `title`, which also determines its on-disk
/// location. The `body` is raw bytes and may be empty. Pages are
/// constructed per request and never shared or cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page title (non-empty identifier, also the storage key).
    pub title: String,
    /// Raw page content.
    pub body: Vec<u8>,
}

impl Page {
    /// Create a page from a title and body.
    #[must_use]
    pub fn new(title: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }

    /// Create a page with an empty body.
    ///
    /// Used when editing a page that does not exist yet.
    #[must_use]
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_page() {
        let page = Page::new("Home", b"hello".to_vec());

        assert_eq!(page.title, "Home");
        assert_eq!(page.body, b"hello");
    }

    #[test]
    fn test_empty_page() {
        let page = Page::empty("NewPage");

        assert_eq!(page.title, "NewPage");
        assert!(page.body.is_empty());
    }
}
