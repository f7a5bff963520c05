use clap::ValueEnum;
use lode_config::Command;

/// Bundler command the configuration is produced for
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum BundlerCommand {
    /// Dev server
    #[value(name = "serve")]
    Serve,

    /// One-shot build
    #[value(name = "build")]
    Build,
}

impl BundlerCommand {
    /// Mode used when `--mode` is not given.
    pub fn default_mode(self) -> &'static str {
        match self {
            BundlerCommand::Serve => "development",
            BundlerCommand::Build => "production",
        }
    }
}

impl From<BundlerCommand> for Command {
    fn from(command: BundlerCommand) -> Self {
        match command {
            BundlerCommand::Serve => Command::Serve,
            BundlerCommand::Build => Command::Build,
        }
    }
}
