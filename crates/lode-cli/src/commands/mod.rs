//! Command implementations.
//!
//! - [`config`] - print the synthesized bundler configuration
//! - [`graph`] - compile a manifest into its bundle graph
//!
//! Each module exposes an `execute` function taking the parsed arguments.

pub mod config;
pub mod graph;
pub(crate) mod utils;

pub use config::execute as config_execute;
pub use graph::execute as graph_execute;
