//! Error handling for the Lode CLI.
//!
//! Library errors convert into [`CliError`] through `#[from]`; `main` turns
//! the final error into a `miette` report with [`cli_error_to_miette`].

use std::path::PathBuf;

use lode_config::ConfigError;
use lode_graph::GraphError;
use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating overrides failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading or writing a manifest failed
    #[error("Manifest error: {0}")]
    Graph(#[from] GraphError),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a [`CliError`] into a `miette` report, adding a hint where one helps.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(ConfigError::NotFound { path }) => miette::miette!(
            help = "Create lode.config.json or lode.toml, or drop --config",
            "Config file not found: {}",
            path.display()
        ),
        CliError::Config(ConfigError::UnsupportedFormat(ext)) => miette::miette!(
            help = "Use a .json or .toml config file",
            "Unsupported config format: {}",
            ext
        ),
        CliError::FileNotFound(path) => miette::miette!(
            help = "Pass the manifest the build wrote, e.g. dist/q-manifest.json",
            "File not found: {}",
            path.display()
        ),
        other => miette::miette!("{}", other),
    }
}
