//! Ambient build context.
//!
//! The working directory and platform are captured once, up front, and
//! threaded through resolution and synthesis as an immutable value. Nothing
//! below this module reads process-wide state.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::paths::normalize_path;

/// Runtime the build is hosted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostRuntime {
    /// Native process (the CLI)
    #[default]
    Native,
    /// Embedded in a Node.js host through bindings
    Node,
    /// Running inside a WebAssembly host
    Wasm,
}

/// Immutable snapshot of the environment a build runs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildContext {
    cwd: String,
    os: String,
    runtime: HostRuntime,
}

impl BuildContext {
    /// Build a context rooted at `cwd` for the current platform.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: normalize_path(&cwd.as_ref().to_string_lossy()),
            os: std::env::consts::OS.to_string(),
            runtime: HostRuntime::Native,
        }
    }

    /// Capture the current process's working directory and platform.
    pub fn probe() -> Result<Self> {
        #[cfg(not(target_family = "wasm"))]
        let (cwd, runtime) = (std::env::current_dir()?, HostRuntime::Native);

        #[cfg(target_family = "wasm")]
        let (cwd, runtime) = (std::path::PathBuf::from("/"), HostRuntime::Wasm);

        let ctx = Self::new(cwd).with_runtime(runtime);
        tracing::debug!(cwd = %ctx.cwd, os = %ctx.os, "probed build context");
        Ok(ctx)
    }

    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = os.into();
        self
    }

    pub fn with_runtime(mut self, runtime: HostRuntime) -> Self {
        self.runtime = runtime;
        self
    }

    /// Normalized working directory, always with `/` separators.
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn runtime(&self) -> HostRuntime {
        self.runtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_cwd() {
        let ctx = BuildContext::new("/work/app/");
        assert_eq!(ctx.cwd(), "/work/app");
        assert_eq!(ctx.os(), std::env::consts::OS);
        assert_eq!(ctx.runtime(), HostRuntime::Native);
    }

    #[test]
    fn builder_overrides_platform() {
        let ctx = BuildContext::new("C:\\work\\app")
            .with_os("windows")
            .with_runtime(HostRuntime::Node);
        assert_eq!(ctx.cwd(), "C:/work/app");
        assert_eq!(ctx.os(), "windows");
        assert_eq!(ctx.runtime(), HostRuntime::Node);
    }

    #[test]
    fn probe_reads_current_dir() {
        let ctx = BuildContext::probe().unwrap();
        let expected = normalize_path(&std::env::current_dir().unwrap().to_string_lossy());
        assert_eq!(ctx.cwd(), expected);
    }
}
