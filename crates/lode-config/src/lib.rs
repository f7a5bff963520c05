//! # lode-config
//!
//! Turns a bundler command, a mode string and user overrides into the
//! complete configuration a host bundler needs for a client, SSR or library
//! build.
//!
//! The pipeline is three pure steps:
//!
//! 1. [`BuildContext`] captures the working directory and platform once.
//! 2. [`resolve_request`] picks the canonical target, build mode and entry
//!    strategy.
//! 3. [`Synthesizer`] layers overrides under the fixed system defaults and
//!    produces a [`BuildConfig`].
//!
//! ```
//! use lode_config::{plan, BuildContext, Command, Overrides};
//!
//! let ctx = BuildContext::new("/project");
//! let config = plan(&ctx, Command::Serve, "development", &Overrides::default());
//! assert_eq!(config.bundler.build.out_dir, "/project/dist");
//! ```

pub mod bundler;
pub mod config;
pub mod context;
pub mod error;
pub mod framework;
pub mod loading;
pub mod overrides;
pub mod paths;
pub mod synthesize;
pub mod target;

pub use bundler::*;
pub use config::{BuildConfig, plan, target_request};
pub use context::{BuildContext, HostRuntime};
pub use error::{ConfigError, Result};
pub use loading::{CONFIG_FILE_NAMES, ENV_PREFIX, OverridesLoader};
pub use overrides::*;
pub use paths::{is_absolute, join_path, normalize_path, resolve_path};
pub use synthesize::{Synthesizer, synthesize};
pub use target::{
    BuildMode, BuildTarget, Command, EntryStrategy, ResolvedTarget, TargetRequest,
    default_entry_strategy, resolve, resolve_request,
};
