//! Bundler-facing configuration shape.
//!
//! Field names and nesting follow what the host bundler's config hook
//! expects (`build.rollupOptions.output[].chunkFileNames` and friends), so
//! the serialized value can be returned to it as-is.

use serde::{Deserialize, Serialize, Serializer};

use crate::overrides::InputSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[serde(alias = "esm", alias = "module")]
    Es,
    #[serde(alias = "commonjs")]
    Cjs,
    Iife,
    Umd,
    Amd,
    System,
}

/// One value or a list of them, mirroring `rollupOptions.output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputSpec<T> {
    Many(Vec<T>),
    Single(T),
}

impl<T> OutputSpec<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OutputSpec::Single(item) => std::slice::from_ref(item),
            OutputSpec::Many(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> OutputSpec<U> {
        match self {
            OutputSpec::Single(item) => OutputSpec::Single(f(item)),
            OutputSpec::Many(items) => OutputSpec::Many(items.into_iter().map(f).collect()),
        }
    }
}

/// A single output variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_file_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_file_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_file_names: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exports: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

/// `build.minify`: a flag or a named minifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Minify {
    Flag(bool),
    Minifier(String),
}

impl Minify {
    pub fn esbuild() -> Self {
        Minify::Minifier("esbuild".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EsbuildOptions {
    pub log_level: String,
    pub jsx: String,
}

/// Transpiler settings; `false` turns the bundler's own pass off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EsbuildSetting {
    Disabled,
    Options(EsbuildOptions),
}

impl Serialize for EsbuildSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EsbuildSetting::Disabled => serializer.serialize_bool(false),
            EsbuildSetting::Options(options) => options.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicImportVarsOptions {
    /// Regex sources
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupOptions {
    pub input: InputSpec,
    pub output: OutputSpec<OutputOptions>,
    pub preserve_entry_signatures: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSection {
    pub out_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssr: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify: Option<Minify>,
    pub module_preload: bool,
    pub css_code_split: bool,
    pub dynamic_import_vars_options: DynamicImportVarsOptions,
    pub rollup_options: RollupOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SsrSection {
    pub no_external: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeDeps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveSection {
    pub conditions: Vec<String>,
    pub dedupe: Vec<String>,
}

/// Configuration contributed to the host bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerConfig {
    pub build: BuildSection,
    pub ssr: SsrSection,
    pub esbuild: EsbuildSetting,
    pub optimize_deps: OptimizeDeps,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_dir: Option<bool>,
    pub resolve: ResolveSection,
    pub env_prefix: Vec<String>,
}

impl BundlerConfig {
    /// Output variants, whether configured as one object or a list.
    pub fn outputs(&self) -> &[OutputOptions] {
        self.build.rollup_options.output.as_slice()
    }
}
