//! Store trait and error types.
//!
//! Provides the core [`PageStore`] trait for abstracting page persistence,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Title Convention
//!
//! All `title` parameters are page identifiers, not file paths. Backends
//! handle the mapping from titles to their internal storage format and
//! must reject titles that would escape their namespace.

use std::path::{Path, PathBuf};

use crate::page::Page;

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Page does not exist.
    NotFound,
    /// Permission denied by the backend.
    PermissionDenied,
    /// Title is empty or would escape the storage namespace.
    InvalidTitle,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create an invalid-title error.
    #[must_use]
    pub fn invalid_title(title: &str) -> Self {
        Self::new(StorageErrorKind::InvalidTitle).with_path(title)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Path context, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Backend identifier, if any.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// True if the error means the page does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidTitle => "Invalid title",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Persistence abstraction for wiki pages.
///
/// Backends map titles to their internal storage format. Every `load`
/// re-reads from the backend and every `save` fully overwrites; there is
/// no caching, no locking and no delete. Concurrent saves to the same
/// title are unordered and the last writer wins.
pub trait PageStore: Send + Sync {
    /// Load the page with the given title.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with kind `NotFound` if no page exists
    /// under `title`, or another kind if the page cannot be read.
    fn load(&self, title: &str) -> Result<Page, StorageError>;

    /// Persist a page, replacing any prior content.
    ///
    /// The write is atomic from the caller's perspective: readers observe
    /// either the previous content or the new content, never a partial
    /// write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the page cannot be written.
    fn save(&self, page: &Page) -> Result<(), StorageError>;

    /// Check if a page exists under the given title.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, title: &str) -> bool;
}
