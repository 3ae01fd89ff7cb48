//! Mock store implementation for testing.
//!
//! Provides [`MemoryStore`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::page::Page;
use crate::store::{PageStore, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Memory";

/// In-memory store for testing.
///
/// Stores page bodies in a map keyed by title. Use the builder methods
/// to seed test data, and [`MemoryStore::fail_saves`] to exercise
/// persistence-failure paths.
///
/// # Example
///
/// ```ignore
/// use quill_storage::{MemoryStore, PageStore};
///
/// let store = MemoryStore::new().with_page("Home", b"hello");
/// let page = store.load("Home").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: RwLock<HashMap<String, Vec<u8>>>,
    fail_saves: bool,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a page with the given title and body.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(title.into(), body.into());
        self
    }

    /// Make every subsequent save fail with a permission error.
    #[must_use]
    pub fn fail_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }
}

impl PageStore for MemoryStore {
    fn load(&self, title: &str) -> Result<Page, StorageError> {
        let pages = self.pages.read().unwrap();
        pages.get(title).map_or_else(
            || {
                Err(StorageError::new(StorageErrorKind::NotFound)
                    .with_path(title)
                    .with_backend(BACKEND))
            },
            |body| Ok(Page::new(title, body.clone())),
        )
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        if self.fail_saves {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(&page.title)
                .with_backend(BACKEND)
                .with_source(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "saves disabled",
                )));
        }
        self.pages
            .write()
            .unwrap()
            .insert(page.title.clone(), page.body.clone());
        Ok(())
    }

    fn exists(&self, title: &str) -> bool {
        self.pages.read().unwrap().contains_key(title)
    }
}
