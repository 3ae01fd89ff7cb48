//! `quill serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::{CliSettings, Config};
use quill_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page data directory (overrides config).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Template directory (overrides config; built-in templates when unset).
    #[arg(short, long)]
    templates_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output (request and save logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            data_dir: self.data_dir,
            templates_dir: self.templates_dir,
            validation: None,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Ensure the data directory exists before accepting requests
        std::fs::create_dir_all(&config.pages_resolved.data_dir)?;

        // Print startup info
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Page directory: {}",
            config.pages_resolved.data_dir.display()
        ));

        if let Some(templates_dir) = &config.templates_resolved {
            output.info(&format!("Templates: {}", templates_dir.display()));
        } else {
            output.info("Templates: built-in");
        }

        // Build server config and run
        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        output.success("Server stopped");
        Ok(())
    }
}
