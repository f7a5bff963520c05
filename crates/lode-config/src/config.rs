//! The synthesized build configuration and the one-call planning entry point.

use serde::Serialize;
use serde_json::Value;

use crate::bundler::BundlerConfig;
use crate::context::BuildContext;
use crate::error::{ConfigError, Result};
use crate::overrides::Overrides;
use crate::synthesize::Synthesizer;
use crate::target::{
    BuildMode, BuildTarget, Command, EntryStrategy, TargetRequest, resolve_request,
};

/// Everything synthesis decided for one build.
///
/// `bundler` is handed to the host bundler; the remaining fields describe
/// the resolved plugin options that the transform side needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub command: Command,
    pub target: BuildTarget,
    pub build_mode: BuildMode,
    pub entry_strategy: EntryStrategy,
    pub debug: bool,
    /// Whether the framework's build-constant virtual module is resolved
    pub resolve_framework_build: bool,
    pub root_dir: String,
    pub src_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<String>,
    pub input: Vec<String>,
    pub out_dir: String,
    pub bundler: BundlerConfig,
}

impl BuildConfig {
    /// Bundler-facing configuration as JSON.
    pub fn bundler_value(&self) -> Result<Value> {
        serde_json::to_value(&self.bundler).map_err(|e| ConfigError::InvalidValue {
            field: "bundler".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Whole configuration as JSON.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }
}

/// Build the target request implied by a command, mode and overrides.
pub fn target_request(command: Command, mode: &str, overrides: &Overrides) -> TargetRequest {
    TargetRequest {
        command,
        mode: mode.to_string(),
        target: overrides.target,
        entry_strategy: overrides.entry_strategy,
        ssr_entry: overrides.has_ssr_entry(),
    }
}

/// Resolve the target and synthesize the configuration in one call.
///
/// # Example
///
/// ```
/// use lode_config::{plan, BuildContext, BuildTarget, Command, Overrides};
///
/// let ctx = BuildContext::new("/project");
/// let config = plan(&ctx, Command::Build, "production", &Overrides::default());
///
/// assert_eq!(config.target, BuildTarget::Client);
/// assert_eq!(config.out_dir, "/project/dist");
/// assert_eq!(config.input, vec!["/project/src/root".to_string()]);
/// ```
pub fn plan(ctx: &BuildContext, command: Command, mode: &str, overrides: &Overrides) -> BuildConfig {
    let resolved = resolve_request(&target_request(command, mode, overrides));
    Synthesizer::new(ctx).synthesize(&resolved, overrides)
}
