//! User-supplied overrides.
//!
//! Mirrors the nested option object a host bundler hands to the plugin:
//! plugin-level `client`/`ssr` sections plus the bundler's own `build`
//! section. Unknown keys are ignored so configs written for newer versions
//! keep loading.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bundler::{Minify, OutputOptions, OutputSpec};
use crate::error::{ConfigError, Result};
use crate::target::{BuildTarget, EntryStrategy};

/// One input path or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputSpec {
    One(String),
    Many(Vec<String>),
}

impl InputSpec {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            InputSpec::One(path) => vec![path.clone()],
            InputSpec::Many(paths) => paths.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            InputSpec::One(path) => path.trim().is_empty(),
            InputSpec::Many(paths) => paths.iter().all(|p| p.trim().is_empty()),
        }
    }
}

/// `build.ssr`: either a flag or the server entry itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SsrEntry {
    Flag(bool),
    Entry(String),
}

impl SsrEntry {
    pub fn entry(&self) -> Option<&str> {
        match self {
            SsrEntry::Entry(path) if !path.trim().is_empty() => Some(path),
            _ => None,
        }
    }

    /// Whether this selects a server build at all.
    pub fn is_enabled(&self) -> bool {
        match self {
            SsrEntry::Flag(flag) => *flag,
            SsrEntry::Entry(path) => !path.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientOverrides {
    pub input: Option<InputSpec>,
    /// Entry served by the dev server, resolved against the working directory
    pub dev_input: Option<String>,
    pub out_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SsrOverrides {
    pub input: Option<InputSpec>,
    pub out_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LibOverrides {
    pub entry: Option<InputSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RollupOverrides {
    pub output: Option<OutputSpec<OutputOptions>>,
}

/// The host bundler's own `build` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildOverrides {
    pub ssr: Option<SsrEntry>,
    pub lib: Option<LibOverrides>,
    pub rollup_options: RollupOverrides,
    pub assets_dir: Option<String>,
    pub out_dir: Option<String>,
    /// Accepted for compatibility; the bundler keeps ownership of it
    pub empty_out_dir: Option<bool>,
    pub minify: Option<Minify>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizeDepsOverrides {
    pub include: Option<Vec<String>>,
    pub exclude: Vec<String>,
}

/// Every knob a caller can turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Overrides {
    pub target: Option<BuildTarget>,
    /// Project root, resolved against the working directory
    pub root: Option<String>,
    /// Source directory, resolved against the project root
    pub src_dir: Option<String>,
    /// Public base path; client output is nested below it
    pub base: Option<String>,
    pub debug: bool,
    pub entry_strategy: Option<EntryStrategy>,
    pub resolve_framework_build: Option<bool>,
    pub client: ClientOverrides,
    pub ssr: SsrOverrides,
    pub build: BuildOverrides,
    pub optimize_deps: OptimizeDepsOverrides,
}

impl Overrides {
    /// Create from serde_json::Value (for programmatic config from a host)
    ///
    /// # Example
    ///
    /// ```
    /// use lode_config::Overrides;
    /// use serde_json::json;
    ///
    /// let overrides = Overrides::from_value(json!({
    ///     "client": { "outDir": "client-dist" },
    ///     "build": { "assetsDir": "static" },
    ///     "somethingElse": true
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(overrides.client.out_dir.as_deref(), Some("client-dist"));
    /// assert_eq!(overrides.build.assets_dir.as_deref(), Some("static"));
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "overrides".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "overrides".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Whether the bundler was handed a server entry.
    pub fn has_ssr_entry(&self) -> bool {
        self.build.ssr.as_ref().is_some_and(SsrEntry::is_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::OutputFormat;
    use serde_json::json;

    #[test]
    fn unknown_keys_are_ignored() {
        let overrides = Overrides::from_value(json!({
            "build": { "sourcemap": true, "outDir": "out" },
            "plugins": []
        }))
        .unwrap();
        assert_eq!(overrides.build.out_dir.as_deref(), Some("out"));
    }

    #[test]
    fn ssr_entry_accepts_flag_or_path() {
        let flag = Overrides::from_value(json!({ "build": { "ssr": true } })).unwrap();
        assert!(flag.has_ssr_entry());
        assert_eq!(flag.build.ssr.unwrap().entry(), None);

        let path = Overrides::from_value(json!({ "build": { "ssr": "src/entry.server.tsx" } })).unwrap();
        assert!(path.has_ssr_entry());

        let off = Overrides::from_value(json!({ "build": { "ssr": false } })).unwrap();
        assert!(!off.has_ssr_entry());
    }

    #[test]
    fn rollup_output_accepts_list() {
        let overrides = Overrides::from_value(json!({
            "build": {
                "rollupOptions": {
                    "output": [
                        { "format": "es", "entryFileNames": "index.mjs" },
                        { "format": "cjs", "entryFileNames": "index.cjs" }
                    ]
                }
            }
        }))
        .unwrap();

        let Some(OutputSpec::Many(outputs)) = overrides.build.rollup_options.output else {
            panic!("expected a list of outputs");
        };
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[1].format, Some(OutputFormat::Cjs));
    }

    #[test]
    fn invalid_types_are_reported() {
        let err = Overrides::from_value(json!({ "debug": "yes" })).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn input_spec_helpers() {
        assert_eq!(InputSpec::One("a".into()).to_vec(), vec!["a".to_string()]);
        assert!(InputSpec::Many(vec![" ".into()]).is_empty());
    }
}
