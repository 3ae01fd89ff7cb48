//! Application state.
//!
//! Shared state for all request handlers. Everything in here is
//! immutable after startup; handlers only read from it.

use std::sync::Arc;

use quill_storage::PageStore;

use crate::error::ServerError;
use crate::render::TemplateSet;
use crate::validate::TitleValidator;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Storage backend for loading and saving pages.
    pub(crate) store: Arc<dyn PageStore>,
    /// Title validator (compiled once at startup).
    pub(crate) validator: TitleValidator,
    /// Loaded template set (built-in or from the template directory).
    pub(crate) templates: TemplateSet,
}

impl AppState {
    /// Validate a title, mapping a rejection to the 404 outcome.
    pub(crate) fn check_title(&self, title: &str) -> Result<(), ServerError> {
        if self.validator.check(title) {
            Ok(())
        } else {
            Err(ServerError::NotFound(title.to_owned()))
        }
    }
}
