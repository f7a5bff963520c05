//! Manifest to bundle-graph compilation.
//!
//! Two passes over the manifest. The first lays out every bundle name and
//! reserves one slot per outgoing edge; the second fills each reserved slot
//! with the index of its target's name. A bundle shared by many dependants is
//! therefore written once and referenced by index everywhere else.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, instrument, warn};

use crate::graph::{BundleGraph, GraphEntry};
use crate::manifest::{BundleDescriptor, Manifest};

/// Which edges become graph references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Also follow dynamic imports, after the static ones
    pub dynamic_imports: bool,
}

impl GraphOptions {
    pub fn with_dynamic_imports(mut self, enabled: bool) -> Self {
        self.dynamic_imports = enabled;
        self
    }
}

/// Compile with the default options (static imports only).
///
/// ```
/// use lode_graph::{compile, BundleDescriptor, Manifest};
///
/// let manifest = Manifest::new()
///     .with_bundle("a.js", BundleDescriptor::new(10).with_imports(["b.js"]))
///     .with_bundle("b.js", BundleDescriptor::new(5));
///
/// let graph = compile(&manifest);
/// assert_eq!(serde_json::to_string(&graph).unwrap(), r#"["a.js",2,"b.js"]"#);
/// ```
pub fn compile(manifest: &Manifest) -> BundleGraph {
    compile_with(manifest, &GraphOptions::default())
}

#[instrument(skip_all, fields(bundles = manifest.len(), dynamic = options.dynamic_imports))]
pub fn compile_with(manifest: &Manifest, options: &GraphOptions) -> BundleGraph {
    if manifest.is_empty() {
        return BundleGraph::default();
    }

    let mut entries: Vec<GraphEntry> = Vec::with_capacity(manifest.len() * 2);
    let mut slots: FxHashMap<&str, usize> = FxHashMap::default();
    let mut pending: Vec<(usize, &str)> = Vec::new();

    for (name, bundle) in &manifest.bundles {
        slots.insert(name.as_str(), entries.len());
        entries.push(GraphEntry::Name(name.clone()));

        for target in edges(manifest, name, bundle, options) {
            pending.push((entries.len(), target));
            // Placeholder until every name has a slot.
            entries.push(GraphEntry::Index(0));
        }
    }

    for (slot, target) in pending {
        if let Some(&index) = slots.get(target) {
            entries[slot] = GraphEntry::Index(index);
        }
    }

    debug!(entries = entries.len(), "compiled bundle graph");
    BundleGraph::new(entries)
}

/// Distinct, resolvable edges of one bundle in first-seen order.
fn edges<'m>(
    manifest: &'m Manifest,
    name: &str,
    bundle: &'m BundleDescriptor,
    options: &GraphOptions,
) -> Vec<&'m str> {
    let dynamic: &[String] = if options.dynamic_imports {
        &bundle.dynamic_imports
    } else {
        &[]
    };

    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for target in bundle.imports.iter().chain(dynamic) {
        let target = target.as_str();
        if target == name || !seen.insert(target) {
            continue;
        }
        if !manifest.bundles.contains_key(target) {
            warn!(bundle = name, import = target, "import names a bundle missing from the manifest");
            continue;
        }
        out.push(target);
    }
    out
}
