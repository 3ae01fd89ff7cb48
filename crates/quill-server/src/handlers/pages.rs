//! Page operation handlers.
//!
//! Implements the three wiki operations. Each request is an independent
//! transition with no state shared between requests beyond the immutable
//! [`AppState`]:
//!
//! - **view**: render the page, or redirect to the edit form if it
//!   cannot be loaded (a missing page is "not yet created", not an
//!   error).
//! - **edit**: render the edit form, prefilled when the page exists and
//!   empty otherwise. This path has no failure branch visible to the
//!   user short of a render failure.
//! - **save**: persist the submitted body and redirect back to the view.

use std::sync::Arc;

use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use quill_storage::Page;
use serde::Deserialize;

use crate::error::ServerError;
use crate::render::Mode;
use crate::state::AppState;

/// Form payload for POST `/save/{title}`.
#[derive(Deserialize)]
pub(crate) struct SaveForm {
    /// New page content.
    body: String,
}

/// Handle GET `/view/{title}`.
pub(crate) async fn view(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Response, ServerError> {
    state.check_title(&title)?;

    match state.store.load(&title) {
        Ok(page) => Ok(Html(state.templates.render(Mode::View, &page)?).into_response()),
        Err(err) => {
            tracing::debug!(title = %title, error = %err, "Page not loadable, redirecting to edit");
            Ok(Redirect::to(&format!("/edit/{title}")).into_response())
        }
    }
}

/// Handle GET `/edit/{title}`.
pub(crate) async fn edit(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<Html<String>, ServerError> {
    state.check_title(&title)?;

    let page = state
        .store
        .load(&title)
        .unwrap_or_else(|_| Page::empty(title));

    Ok(Html(state.templates.render(Mode::Edit, &page)?))
}

/// Handle POST `/save/{title}`.
pub(crate) async fn save(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
    Form(form): Form<SaveForm>,
) -> Result<Redirect, ServerError> {
    state.check_title(&title)?;

    let page = Page::new(title.clone(), form.body.into_bytes());
    state.store.save(&page).map_err(ServerError::Save)?;

    tracing::info!(title = %title, bytes = page.body.len(), "Page saved");
    Ok(Redirect::to(&format!("/view/{title}")))
}
