//! HTTP server for the Quill wiki engine.
//!
//! This crate provides a native Rust HTTP server using axum, serving the
//! three wiki operations over exact, case-sensitive routes:
//!
//! - `GET /view/{title}` - render a page, redirecting to edit if absent
//! - `GET /edit/{title}` - render the edit form, prefilled if present
//! - `POST /save/{title}` - persist the form field `body` as the page
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use quill_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 8080,
//!         data_dir: PathBuf::from("pages"),
//!         templates_dir: None,
//!         validation: Default::default(),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (quill-server)
//!                        │
//!                        ├─► TitleValidator ── rejects malformed titles (404)
//!                        │
//!                        ├─► handlers (view/edit/save)
//!                        │       │
//!                        │       └─► PageStore ── one file per page
//!                        │
//!                        └─► TemplateSet ── HTML responses, escaped
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod render;
mod state;
mod validate;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use quill_config::ValidationMode;
use quill_storage::{FsStore, PageStore};

use render::TemplateSet;
use state::AppState;
use validate::TitleValidator;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding one `<title>.txt` file per page.
    pub data_dir: PathBuf,
    /// Template directory (`None` selects the built-in templates).
    pub templates_dir: Option<PathBuf>,
    /// Title validation policy.
    pub validation: ValidationMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("pages"),
            templates_dir: None,
            validation: ValidationMode::default(),
        }
    }
}

/// Run the server.
///
/// Loads templates and compiles the title validator once, then serves
/// requests until interrupted. Startup failures (unbindable address,
/// missing template files) are returned to the caller; per-request
/// failures are handled in the respective handler and never propagate
/// here.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Create shared storage backend
    let store: Arc<dyn PageStore> = Arc::new(FsStore::new(config.data_dir.clone()));

    // Load templates: a missing template file is an unrecoverable
    // startup failure.
    let templates = match &config.templates_dir {
        Some(dir) => TemplateSet::load(dir)?,
        None => TemplateSet::builtin(),
    };

    // Create app state
    let state = Arc::new(AppState {
        store,
        validator: TitleValidator::new(config.validation),
        templates,
    });

    // Create router
    let app = app::create_router(state);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, data_dir = %config.data_dir.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Quill config.
///
/// # Arguments
///
/// * `config` - Quill configuration
#[must_use]
pub fn server_config_from_config(config: &quill_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        data_dir: config.pages_resolved.data_dir.clone(),
        templates_dir: config.templates_resolved.clone(),
        validation: config.pages_resolved.validation,
    }
}
