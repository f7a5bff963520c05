//! Layered loading of [`Overrides`].
//!
//! Priority: environment variables > config file > defaults. The CLI layers
//! its own flags on top of whatever this returns.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Toml},
};
use crate::error::{ConfigError, Result};
use crate::overrides::Overrides;

/// Config files searched for in the project root, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["lode.config.json", "lode.toml"];

/// Prefix for environment overrides; nesting uses `__`
/// (`LODE_BUILD__OUT_DIR=out` sets `build.outDir`).
pub const ENV_PREFIX: &str = "LODE_";

/// Finds and merges every override source for one project.
///
/// # Example
///
/// ```no_run
/// use lode_config::OverridesLoader;
///
/// let overrides = OverridesLoader::new(".").load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct OverridesLoader {
    root: PathBuf,
    config_file: Option<PathBuf>,
    env_prefix: String,
}

impl OverridesLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config_file: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use this file instead of searching; it must exist.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Locate the config file, if any.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` when an explicit file does not exist.
    pub fn find(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.config_file {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                self.root.join(path)
            };
            if !path.exists() {
                return Err(ConfigError::NotFound { path });
            }
            return Ok(Some(path));
        }

        Ok(CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.exists()))
    }

    /// Assemble the layered figment without extracting it.
    pub fn figment(&self) -> Result<Figment> {
        let mut figment = Figment::new();

        if let Some(path) = self.find()? {
            tracing::debug!(path = %path.display(), "loading overrides file");
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(&path)),
                Some("toml") => figment.merge(Toml::file(&path)),
                other => {
                    return Err(ConfigError::UnsupportedFormat(
                        other.unwrap_or("<none>").to_string(),
                    ));
                }
            };
        }

        tracing::debug!(prefix = %self.env_prefix, "applying environment overrides");
        figment = figment.merge(
            Env::prefixed(&self.env_prefix)
                .split("__")
                .map(|key| camelize_path(key.as_str()).into())
                .lowercase(false),
        );

        Ok(figment)
    }

    pub fn load(&self) -> Result<Overrides> {
        Ok(self.figment()?.extract()?)
    }
}

/// Environment keys arrive as `BUILD.OUT_DIR`; overrides use `build.outDir`.
fn camelize_path(key: &str) -> String {
    key.split('.')
        .map(|segment| camelize(&segment.to_ascii_lowercase()))
        .collect::<Vec<_>>()
        .join(".")
}

fn camelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn camelize_converts_snake_case() {
        assert_eq!(camelize("out_dir"), "outDir");
        assert_eq!(camelize("empty_out_dir"), "emptyOutDir");
        assert_eq!(camelize("debug"), "debug");
        assert_eq!(camelize("_private"), "private");
    }

    #[test]
    fn camelize_path_handles_each_segment() {
        assert_eq!(camelize_path("BUILD.OUT_DIR"), "build.outDir");
        assert_eq!(camelize_path("ENTRY_STRATEGY.TYPE"), "entryStrategy.type");
        assert_eq!(camelize_path("DEBUG"), "debug");
    }

    #[test]
    fn find_returns_none_without_config() {
        let dir = TempDir::new().unwrap();
        assert!(OverridesLoader::new(dir.path()).find().unwrap().is_none());
    }

    #[test]
    fn find_prefers_json_over_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lode.toml"), "debug = true\n").unwrap();
        fs::write(dir.path().join("lode.config.json"), "{}").unwrap();

        let found = OverridesLoader::new(dir.path()).find().unwrap().unwrap();
        assert_eq!(found, dir.path().join("lode.config.json"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = OverridesLoader::new(dir.path())
            .with_config_file("missing.json")
            .find()
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("lode.yaml"), "debug: true\n").unwrap();
        let err = OverridesLoader::new(dir.path())
            .with_config_file("lode.yaml")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "yaml"));
    }
}
