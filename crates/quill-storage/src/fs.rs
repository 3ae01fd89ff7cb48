//! Filesystem store implementation.
//!
//! Provides [`FsStore`] for persisting pages as individual files under a
//! data directory.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::page::Page;
use crate::store::{PageStore, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// File extension for stored pages.
const PAGE_SUFFIX: &str = ".txt";

/// Filesystem store implementation.
///
/// Each page is one file named `<title>.txt` under the data directory.
/// Saves go through a temporary file in the same directory followed by a
/// rename, so a concurrent reader observes either the old or the new
/// content, never a torn write. On Unix the temporary file is created
/// with mode 0600 and the rename preserves it, keeping saved pages
/// private to the owning user.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use quill_storage::{FsStore, Page, PageStore};
///
/// let store = FsStore::new(PathBuf::from("pages"));
/// store.save(&Page::new("Home", b"hello".to_vec()))?;
/// let page = store.load("Home")?;
/// ```
pub struct FsStore {
    /// Root directory for page storage.
    data_dir: PathBuf,
}

impl FsStore {
    /// Create a new filesystem store rooted at `data_dir`.
    ///
    /// The directory is created lazily on the first save.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Map a title to its backing file path.
    ///
    /// Rejects titles that are empty or could escape the data directory
    /// (`/`, `\`, `..`). The HTTP layer normally validates titles before
    /// they reach the store, but under prefix-only validation this is the
    /// only guard against path traversal.
    fn page_path(&self, title: &str) -> Result<PathBuf, StorageError> {
        if title.is_empty() || title.contains(['/', '\\']) || title.contains("..") {
            return Err(StorageError::invalid_title(title).with_backend(BACKEND));
        }
        Ok(self.data_dir.join(format!("{title}{PAGE_SUFFIX}")))
    }
}

impl PageStore for FsStore {
    fn load(&self, title: &str) -> Result<Page, StorageError> {
        let path = self.page_path(title)?;
        let body =
            fs::read(&path).map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))?;
        Ok(Page::new(title, body))
    }

    fn save(&self, page: &Page) -> Result<(), StorageError> {
        let path = self.page_path(&page.title)?;

        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::io(e, Some(self.data_dir.clone())).with_backend(BACKEND))?;

        // Write-then-rename keeps the previous content visible until the
        // new content is complete. NamedTempFile creates the file with
        // mode 0600 on Unix.
        let mut tmp = NamedTempFile::new_in(&self.data_dir)
            .map_err(|e| StorageError::io(e, Some(self.data_dir.clone())).with_backend(BACKEND))?;
        tmp.write_all(&page.body)
            .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;
        tmp.persist(&path)
            .map_err(|e| StorageError::io(e.error, Some(path.clone())).with_backend(BACKEND))?;

        tracing::debug!(title = %page.title, path = %path.display(), "Page saved");
        Ok(())
    }

    fn exists(&self, title: &str) -> bool {
        self.page_path(title).is_ok_and(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::StorageErrorKind;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_store_is_send_sync() {
        assert_send_sync::<FsStore>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = create_test_dir();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        store
            .save(&Page::new("Home", b"Hello, wiki.".to_vec()))
            .unwrap();
        let page = store.load("Home").unwrap();

        assert_eq!(page.title, "Home");
        assert_eq!(page.body, b"Hello, wiki.");
    }

    #[test]
    fn test_save_round_trips_arbitrary_bytes() {
        let temp_dir = create_test_dir();
        let store = FsStore::new(temp_dir.path().to_path_buf());
        let body = vec![0u8, 159, 146, 150, 255, 10, 13];

        store.save(&Page::new("Binary1", body.clone())).unwrap();

        assert_eq!(store.load("Binary1").unwrap().body, body);
    }

    #[test]
    fn test_save_empty_body() {
        let temp_dir = create_test_dir();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        store.save(&Page::empty("Blank")).unwrap();
        let page = store.load("Blank").unwrap();

        assert!(page.body.is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let temp_dir = create_test_dir();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        store.save(&Page::new("Home", b"first".to_vec())).unwrap();
        store.save(&Page::new("Home", b"second".to_vec())).unwrap();

        assert_eq!(store.load("Home").unwrap().body, b"second");
    }

    #[test]
    fn test_save_is_idempotent() {
        let temp_dir = create_test_dir();
        let store = FsStore::new(temp_dir.path().to_path_buf());
        let page = Page::new("Home", b"same content".to_vec());

        store.save(&page).unwrap();
        store.save(&page).unwrap();

        assert_eq!(store.load("Home").unwrap().body, b"same content");
    }

    #[test]
    fn test_save_creates_data_dir() {
        let temp_dir = create_test_dir();
        let data_dir = temp_dir.path().join("pages");
        let store = FsStore::new(data_dir.clone());

        store.save(&Page::new("Home", b"hello".to_vec())).unwrap();

        assert!(data_dir.join("Home.txt").exists());
    }

    #[test]
    fn test_page_file_uses_txt_suffix() {
        let temp_dir = create_test_dir();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        store.save(&Page::new("Guide", b"content".to_vec())).unwrap();

        assert!(temp_dir.path().join("Guide.txt").exists());
    }

    #[test]
    fn test_load_missing_page() {
        let temp_dir = create_test_dir();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let err = store.load("NoSuchPage").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert!(err.is_not_found());
        assert_eq!(err.backend(), Some("Fs"));
    }

    #[test]
    fn test_load_rejects_path_traversal() {
        let temp_dir = create_test_dir();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        for title in ["../etc/passwd", "..", "a/b", "a\\b", ""] {
            let err = store.load(title).unwrap_err();
            assert_eq!(err.kind(), StorageErrorKind::InvalidTitle, "title: {title:?}");
        }
    }

    #[test]
    fn test_save_rejects_path_traversal() {
        let temp_dir = create_test_dir();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        let err = store
            .save(&Page::new("../escape", b"x".to_vec()))
            .unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::InvalidTitle);
        assert!(!temp_dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[test]
    fn test_exists() {
        let temp_dir = create_test_dir();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        store.save(&Page::new("Home", b"hello".to_vec())).unwrap();

        assert!(store.exists("Home"));
        assert!(!store.exists("NoSuchPage"));
        assert!(!store.exists("../etc/passwd"));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = create_test_dir();
        let store = FsStore::new(temp_dir.path().to_path_buf());

        store.save(&Page::new("Secret", b"hidden".to_vec())).unwrap();

        let mode = fs::metadata(temp_dir.path().join("Secret.txt"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_into_unwritable_dir_fails() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = create_test_dir();
        let data_dir = temp_dir.path().join("pages");
        fs::create_dir(&data_dir).unwrap();
        fs::set_permissions(&data_dir, fs::Permissions::from_mode(0o555)).unwrap();

        let store = FsStore::new(data_dir.clone());
        let result = store.save(&Page::new("Home", b"hello".to_vec()));

        // Restore permissions so TempDir cleanup succeeds.
        fs::set_permissions(&data_dir, fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::PermissionDenied);
        assert!(!err.to_string().is_empty());
    }
}
