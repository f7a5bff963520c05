//! Lode CLI.
//!
//! Prints the bundler configuration synthesized for a command and mode, and
//! compiles build manifests into bundle graphs.
//!
//! - [`cli`] - argument definitions
//! - `commands` - one module per subcommand
//! - [`error`] - error types and diagnostic conversion
//! - [`logger`] - `tracing` subscriber setup
//! - [`ui`] - status lines on stderr

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
