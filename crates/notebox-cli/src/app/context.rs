//! Application context for the Notebox CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file and the notes
//! bridge, which is only started when a command needs it.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use notebox_core::bridge::{FailureKind, NotesBridge, Outcome, Request};

use crate::cli::Cli;
use crate::config::NoteboxConfig;
use crate::errors::CliError;

use super::resolver::{load_config, missing_store_message, resolve_store_path};

/// Application context that bundles CLI args with config and the bridge.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<NoteboxConfig>>,
    bridge: OnceCell<NotesBridge>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
            bridge: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file contents, loading them lazily. `None` if absent.
    pub fn config(&self) -> anyhow::Result<Option<&NoteboxConfig>> {
        self.config
            .get_or_try_init(load_config)
            .map(Option::as_ref)
    }

    /// Resolve the notes store path.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        resolve_store_path(self.cli, self.config()?)
    }

    /// Resolve the notes store path, failing if the store has not been created.
    pub fn existing_store_path(&self) -> anyhow::Result<PathBuf> {
        let path = self.store_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                format!("Notes store not found: {}", path.display()),
                missing_store_message(&path),
            )
            .into());
        }
        Ok(path)
    }

    /// Get the notes bridge, starting its worker on first use.
    ///
    /// The store itself is opened by the worker on the first request.
    pub fn bridge(&self) -> anyhow::Result<&NotesBridge> {
        self.bridge
            .get_or_try_init(|| -> anyhow::Result<NotesBridge> {
                Ok(NotesBridge::spawn(self.store_path()?))
            })
    }

    /// Run one request against an existing store.
    ///
    /// Failed outcomes become errors; `NotFound` is returned to the caller.
    pub async fn call(&self, request: Request) -> anyhow::Result<Outcome> {
        self.existing_store_path()?;
        let response = self.bridge()?.request(request).await;
        match response.outcome {
            Outcome::Failed(failure) => Err(match failure.kind {
                FailureKind::InvalidRequest => CliError::invalid_input(failure.message).into(),
                FailureKind::StoreCorrupt => anyhow::anyhow!(
                    "{}\nHint: The store file was left untouched. Restore it from a backup.",
                    failure.message
                ),
                _ => anyhow::anyhow!("{}", failure.message),
            }),
            outcome => Ok(outcome),
        }
    }

    /// Stop the bridge worker if it was started.
    pub async fn shutdown(self) {
        if let Some(bridge) = self.bridge.into_inner() {
            bridge.shutdown().await;
        }
    }
}
