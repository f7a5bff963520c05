//! Command-line interface definition.
//!
//! - `lode config` - print the bundler configuration for a command and mode
//! - `lode graph` - compile a build manifest into its bundle graph

mod commands;
pub mod enums;
mod validation;

use clap::Parser;

pub use commands::{Command, ConfigArgs, GraphArgs};
pub use enums::*;

/// Lode - bundler configuration synthesis and bundle-graph compilation
#[derive(Parser, Debug)]
#[command(
    name = "lode",
    version,
    about = "Bundler configuration synthesis and bundle-graph compilation",
    long_about = "Lode resolves a bundler command and mode into a client, SSR or library build\n\
                  and prints the complete bundler configuration for it. After a build it\n\
                  compiles the emitted manifest into the compact graph a prefetcher walks."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
