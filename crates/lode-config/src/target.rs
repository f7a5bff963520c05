//! Target resolution.
//!
//! Maps a requested command, a free-form mode string and an optional explicit
//! target onto the canonical `(target, build mode, entry strategy)` triple.
//! Resolution is total: unrecognized strings degrade to the nearest default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bundler command being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Dev server
    #[default]
    Serve,
    /// One-shot build
    Build,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Serve => "serve",
            Command::Build => "build",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the build produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTarget {
    /// Browser bundles
    #[default]
    Client,
    /// Server-side rendering bundle
    Ssr,
    /// Reusable library
    Lib,
}

impl BuildTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildTarget::Client => "client",
            BuildTarget::Ssr => "ssr",
            BuildTarget::Lib => "lib",
        }
    }

    /// Output directory used when nothing else is configured.
    pub fn default_out_dir(&self) -> &'static str {
        match self {
            BuildTarget::Client => "dist",
            BuildTarget::Ssr => "server",
            BuildTarget::Lib => "lib",
        }
    }
}

impl FromStr for BuildTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(BuildTarget::Client),
            "ssr" | "server" => Ok(BuildTarget::Ssr),
            "lib" | "library" => Ok(BuildTarget::Lib),
            other => Err(format!("unknown build target: {}", other)),
        }
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Development,
    Production,
}

impl BuildMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, BuildMode::Production)
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How source modules are grouped into bundles.
///
/// Serialized as `{"type": "segment"}` and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntryStrategy {
    /// One bundle per lazy-loadable segment
    Segment,
    /// Heuristic grouping for production clients
    Smart,
    /// Segments hoisted into their parent module
    Hoist,
    /// Segments inlined into the module that declares them
    Inline,
    /// Everything in a single bundle
    Single,
}

impl EntryStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStrategy::Segment => "segment",
            EntryStrategy::Smart => "smart",
            EntryStrategy::Hoist => "hoist",
            EntryStrategy::Inline => "inline",
            EntryStrategy::Single => "single",
        }
    }
}

impl FromStr for EntryStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "segment" => Ok(EntryStrategy::Segment),
            "smart" => Ok(EntryStrategy::Smart),
            "hoist" => Ok(EntryStrategy::Hoist),
            "inline" => Ok(EntryStrategy::Inline),
            "single" => Ok(EntryStrategy::Single),
            other => Err(format!("unknown entry strategy: {}", other)),
        }
    }
}

impl fmt::Display for EntryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the resolver looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetRequest {
    pub command: Command,
    pub mode: String,
    pub target: Option<BuildTarget>,
    pub entry_strategy: Option<EntryStrategy>,
    /// The bundler was handed a server entry (`build.ssr`)
    pub ssr_entry: bool,
}

impl TargetRequest {
    pub fn new(command: Command, mode: impl Into<String>) -> Self {
        Self {
            command,
            mode: mode.into(),
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: BuildTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_entry_strategy(mut self, strategy: EntryStrategy) -> Self {
        self.entry_strategy = Some(strategy);
        self
    }

    pub fn with_ssr_entry(mut self, ssr_entry: bool) -> Self {
        self.ssr_entry = ssr_entry;
        self
    }
}

/// Canonical output of target resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTarget {
    pub command: Command,
    pub target: BuildTarget,
    pub build_mode: BuildMode,
    pub entry_strategy: EntryStrategy,
    /// Client dev server: the single dev entry replaces the regular inputs
    pub dev_server: bool,
}

impl ResolvedTarget {
    pub fn is_build(&self) -> bool {
        matches!(self.command, Command::Build)
    }
}

/// Resolve a bare `(command, mode, target)` request.
///
/// ```
/// use lode_config::{resolve, BuildMode, BuildTarget, Command, EntryStrategy};
///
/// let resolved = resolve(Command::Build, "production", None);
/// assert_eq!(resolved.target, BuildTarget::Client);
/// assert_eq!(resolved.build_mode, BuildMode::Production);
/// assert_eq!(resolved.entry_strategy, EntryStrategy::Smart);
/// ```
pub fn resolve(command: Command, mode: &str, target: Option<BuildTarget>) -> ResolvedTarget {
    let mut request = TargetRequest::new(command, mode);
    request.target = target;
    resolve_request(&request)
}

/// Resolve a full [`TargetRequest`].
pub fn resolve_request(request: &TargetRequest) -> ResolvedTarget {
    let mode = request.mode.trim().to_lowercase();

    let target = request.target.unwrap_or_else(|| {
        if request.ssr_entry || mode == "ssr" {
            BuildTarget::Ssr
        } else if mode == "lib" {
            BuildTarget::Lib
        } else {
            BuildTarget::Client
        }
    });

    let build_mode = resolve_build_mode(request.command, &mode, target);
    let entry_strategy = request
        .entry_strategy
        .unwrap_or_else(|| default_entry_strategy(request.command, target, build_mode));
    let dev_server = request.command == Command::Serve && target == BuildTarget::Client;

    tracing::debug!(
        command = %request.command,
        mode = %request.mode,
        %target,
        %build_mode,
        %entry_strategy,
        "resolved build target"
    );

    ResolvedTarget {
        command: request.command,
        target,
        build_mode,
        entry_strategy,
        dev_server,
    }
}

fn resolve_build_mode(command: Command, mode: &str, target: BuildTarget) -> BuildMode {
    match mode {
        "production" => BuildMode::Production,
        "development" | "" => BuildMode::Development,
        _ if command == Command::Build && target == BuildTarget::Client => BuildMode::Production,
        _ => BuildMode::Development,
    }
}

/// Entry-strategy table used when the caller does not pick one.
pub fn default_entry_strategy(
    command: Command,
    target: BuildTarget,
    build_mode: BuildMode,
) -> EntryStrategy {
    match (target, build_mode) {
        (BuildTarget::Ssr, _) => EntryStrategy::Hoist,
        (BuildTarget::Lib, _) => EntryStrategy::Segment,
        (BuildTarget::Client, _) if command == Command::Serve => EntryStrategy::Segment,
        (BuildTarget::Client, BuildMode::Production) => EntryStrategy::Smart,
        (BuildTarget::Client, BuildMode::Development) => EntryStrategy::Segment,
    }
}
