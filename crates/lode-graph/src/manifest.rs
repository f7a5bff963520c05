//! The build manifest: every emitted bundle and its import edges.
//!
//! Fields this crate does not interpret are carried through untouched so a
//! manifest can be read, annotated with its bundle graph and written back.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::compile::{GraphOptions, compile_with};
use crate::error::{GraphError, Result};
use crate::graph::BundleGraph;

/// One emitted bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleDescriptor {
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Static imports, in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    /// Dynamic imports, in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dynamic_imports: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BundleDescriptor {
    pub fn new(size: u64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dynamic_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dynamic_imports = imports.into_iter().map(Into::into).collect();
        self
    }
}

/// Bundles keyed by file name, in the order the bundler declared them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub bundles: IndexMap<String, BundleDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_graph: Option<BundleGraph>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bundle, replacing any previous bundle of the same name in place.
    pub fn with_bundle(mut self, name: impl Into<String>, bundle: BundleDescriptor) -> Self {
        self.bundles.insert(name.into(), bundle);
        self
    }

    /// Parse a manifest from JSON text.
    ///
    /// ```
    /// use lode_graph::Manifest;
    ///
    /// let manifest = Manifest::from_json(r#"{
    ///     "bundles": {
    ///         "a.js": { "size": 10, "imports": ["b.js"] },
    ///         "b.js": { "size": 5 }
    ///     }
    /// }"#)
    /// .unwrap();
    ///
    /// assert_eq!(manifest.len(), 2);
    /// assert_eq!(manifest.bundles["a.js"].imports, vec!["b.js".to_string()]);
    /// ```
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read a manifest file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GraphError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn bundle(&self, name: &str) -> Option<&BundleDescriptor> {
        self.bundles.get(name)
    }

    /// Sum of every bundle's size.
    pub fn total_size(&self) -> u64 {
        self.bundles.values().map(|bundle| bundle.size).sum()
    }

    /// Compile the bundle graph and store it in `bundleGraph`.
    pub fn embed_bundle_graph(&mut self, options: &GraphOptions) -> &BundleGraph {
        let graph = compile_with(self, options);
        self.bundle_graph.insert(graph)
    }
}
