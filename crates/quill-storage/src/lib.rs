//! Page storage for the Quill wiki engine.
//!
//! This crate provides a [`PageStore`] trait for abstracting page
//! persistence from the underlying storage backend. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** beyond one-file-per-page
//! - **Clean separation** between HTTP dispatch and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Page`], the unit of content: a title and a raw byte body
//! - [`PageStore`] trait with `load()`, `save()`, and `exists()` methods
//! - [`FsStore`] implementation mapping each page to `<title>.txt`
//! - [`MemoryStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use quill_storage::{FsStore, Page, PageStore};
//!
//! let store = FsStore::new(PathBuf::from("pages"));
//! store.save(&Page::new("Home", b"Hello, wiki.".to_vec()))?;
//! let page = store.load("Home")?;
//! println!("{}: {} bytes", page.title, page.body.len());
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod page;
mod store;

pub use fs::FsStore;
#[cfg(feature = "mock")]
pub use mock::MemoryStore;
pub use page::Page;
pub use store::{PageStore, StorageError, StorageErrorKind};
