use clap::{Args, Subcommand};
use std::path::PathBuf;

use lode_config::{BuildTarget, EntryStrategy};

use crate::cli::enums::*;
use crate::cli::validation::{parse_entry_strategy, parse_target};

/// Available Lode subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the bundler configuration for a command and mode
    ///
    /// Overrides come from lode.config.json or lode.toml in the project root,
    /// then LODE_* environment variables, then the flags below.
    Config(ConfigArgs),

    /// Compile a build manifest into its bundle graph
    ///
    /// Prints the flat graph array, or with --embed the whole manifest with
    /// its bundleGraph field filled in.
    Graph(GraphArgs),
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Bundler command being configured
    #[arg(short = 'c', long, value_enum, default_value = "build")]
    pub command: BundlerCommand,

    /// Mode string (development, production, ssr, lib or any custom mode)
    ///
    /// Defaults to production for build and development for serve.
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Force a build target instead of deriving it from the mode
    ///
    /// One of client, ssr (alias server) or lib (alias library).
    #[arg(short, long, value_parser = parse_target, value_name = "TARGET")]
    pub target: Option<BuildTarget>,

    /// Entry strategy instead of the default for the target and mode
    ///
    /// One of segment, smart, hoist, inline or single.
    #[arg(long, value_parser = parse_entry_strategy, value_name = "STRATEGY")]
    pub entry_strategy: Option<EntryStrategy>,

    /// Server entry handed to the bundler (selects an SSR build)
    #[arg(long, value_name = "FILE")]
    pub ssr_entry: Option<String>,

    /// Output directory, relative to the project root
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out_dir: Option<String>,

    /// Config file to use instead of searching the project root
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Print the resolved build options instead of the bundler configuration
    #[arg(long)]
    pub options: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the graph command
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Manifest file written by the build
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Follow dynamic imports as well as static ones
    #[arg(long)]
    pub dynamic_imports: bool,

    /// Emit the manifest with the compiled graph in its bundleGraph field
    #[arg(long)]
    pub embed: bool,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}
