//! Render/response adapter.
//!
//! Turns a page plus a rendering mode into an HTML document. Templates
//! are keyed by mode (`view.html`, `edit.html`) and loaded once at
//! startup, either from a configured directory or from the built-in
//! inline variants. Substituted values are HTML-escaped.

use std::path::{Path, PathBuf};

use quill_storage::Page;

/// Built-in view template, used when no template directory is configured.
const BUILTIN_VIEW: &str = r#"<!DOCTYPE html>
<html>
<head><title>{{title}}</title></head>
<body>
<h1>{{title}}</h1>
<p>[<a href="/edit/{{title}}">edit</a>]</p>
<div><pre>{{body}}</pre></div>
</body>
</html>
"#;

/// Built-in edit template.
const BUILTIN_EDIT: &str = r#"<!DOCTYPE html>
<html>
<head><title>Editing {{title}}</title></head>
<body>
<h1>Editing {{title}}</h1>
<form action="/save/{{title}}" method="POST">
<div><textarea name="body" rows="20" cols="80">{{body}}</textarea></div>
<div><input type="submit" value="Save"></div>
</form>
</body>
</html>
"#;

/// Rendering mode, keyed to the operation that produced the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Read-only page display.
    View,
    /// Edit form, prefilled with the current body.
    Edit,
}

impl Mode {
    /// Template file name for this mode.
    fn template_name(self) -> &'static str {
        match self {
            Self::View => "view.html",
            Self::Edit => "edit.html",
        }
    }
}

/// Render error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RenderError {
    /// Template file could not be read at startup.
    #[error("Failed to read template {}: {source}", .path.display())]
    Template {
        /// Path of the missing or unreadable template.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Page body is not valid UTF-8 and cannot be rendered as HTML.
    #[error("Page body is not valid UTF-8: {0}")]
    BodyNotUtf8(#[from] std::str::Utf8Error),
}

/// Immutable set of loaded templates, one per rendering mode.
///
/// Constructed once at startup and shared by reference through the
/// application state.
#[derive(Debug)]
pub(crate) struct TemplateSet {
    view: String,
    edit: String,
}

impl TemplateSet {
    /// Create a template set from the built-in inline templates.
    #[must_use]
    pub(crate) fn builtin() -> Self {
        Self {
            view: BUILTIN_VIEW.to_owned(),
            edit: BUILTIN_EDIT.to_owned(),
        }
    }

    /// Load `view.html` and `edit.html` from a template directory.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if either file cannot be read.
    /// Callers treat this as an unrecoverable startup failure.
    pub(crate) fn load(dir: &Path) -> Result<Self, RenderError> {
        Ok(Self {
            view: read_template(dir, Mode::View)?,
            edit: read_template(dir, Mode::Edit)?,
        })
    }

    /// Render a page in the given mode.
    ///
    /// Replaces `{{title}}` and `{{body}}` placeholders with escaped
    /// values. The title is escaped for attribute contexts (it appears in
    /// `href` and `action` values), the body for text contexts.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::BodyNotUtf8`] if the body cannot be
    /// interpreted as UTF-8 text.
    pub(crate) fn render(&self, mode: Mode, page: &Page) -> Result<String, RenderError> {
        let body = std::str::from_utf8(&page.body)?;
        let template = match mode {
            Mode::View => &self.view,
            Mode::Edit => &self.edit,
        };

        Ok(template
            .replace(
                "{{title}}",
                &html_escape::encode_quoted_attribute(&page.title),
            )
            .replace("{{body}}", &html_escape::encode_text(body)))
    }
}

/// Read one template file from the directory.
fn read_template(dir: &Path, mode: Mode) -> Result<String, RenderError> {
    let path = dir.join(mode.template_name());
    std::fs::read_to_string(&path).map_err(|source| RenderError::Template { path, source })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_builtin_view_render() {
        let templates = TemplateSet::builtin();
        let page = Page::new("Home", b"Hello, wiki.".to_vec());

        let html = templates.render(Mode::View, &page).unwrap();

        assert!(html.contains("<h1>Home</h1>"));
        assert!(html.contains("Hello, wiki."));
        assert!(html.contains(r#"<a href="/edit/Home">edit</a>"#));
    }

    #[test]
    fn test_builtin_edit_render() {
        let templates = TemplateSet::builtin();
        let page = Page::new("NewPage", Vec::new());

        let html = templates.render(Mode::Edit, &page).unwrap();

        assert!(html.contains("Editing NewPage"));
        assert!(html.contains(r#"<form action="/save/NewPage" method="POST">"#));
        assert!(html.contains(r#"<textarea name="body" rows="20" cols="80"></textarea>"#));
    }

    #[test]
    fn test_render_escapes_body() {
        let templates = TemplateSet::builtin();
        let page = Page::new("Home", b"<script>alert(1)</script>".to_vec());

        let html = templates.render(Mode::View, &page).unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_render_escapes_textarea_terminator() {
        let templates = TemplateSet::builtin();
        let page = Page::new("Home", b"</textarea><b>x</b>".to_vec());

        let html = templates.render(Mode::Edit, &page).unwrap();

        assert!(!html.contains("</textarea><b>x</b>"));
    }

    #[test]
    fn test_render_rejects_non_utf8_body() {
        let templates = TemplateSet::builtin();
        let page = Page::new("Home", vec![0xff, 0xfe, 0xfd]);

        let err = templates.render(Mode::View, &page).unwrap_err();

        assert!(matches!(err, RenderError::BodyNotUtf8(_)));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("view.html"), "V:{{title}}:{{body}}").unwrap();
        std::fs::write(dir.path().join("edit.html"), "E:{{title}}:{{body}}").unwrap();

        let templates = TemplateSet::load(dir.path()).unwrap();
        let page = Page::new("Home", b"text".to_vec());

        assert_eq!(templates.render(Mode::View, &page).unwrap(), "V:Home:text");
        assert_eq!(templates.render(Mode::Edit, &page).unwrap(), "E:Home:text");
    }

    #[test]
    fn test_load_missing_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("view.html"), "{{body}}").unwrap();

        let err = TemplateSet::load(dir.path()).unwrap_err();

        assert!(matches!(err, RenderError::Template { .. }));
        assert!(err.to_string().contains("edit.html"));
    }
}
