//! Bundle graph compilation against realistic manifests.

use lode_graph::{
    BundleDescriptor, BundleGraph, GraphEntry, GraphOptions, Manifest, compile, compile_with,
};
use proptest::prelude::*;
use serde_json::json;

fn abc_manifest() -> Manifest {
    Manifest::from_value(json!({
        "bundles": {
            "a.js": { "size": 0, "imports": ["b.js"], "dynamicImports": ["c.js"] },
            "b.js": { "size": 0, "dynamicImports": ["c.js"] },
            "c.js": { "size": 0 }
        }
    }))
    .unwrap()
}

#[test]
fn empty_manifest_compiles_to_empty_graph() {
    let manifest = Manifest::from_value(json!({})).unwrap();
    assert!(compile(&manifest).is_empty());

    let manifest = Manifest::from_value(json!({ "bundles": {} })).unwrap();
    assert_eq!(serde_json::to_value(compile(&manifest)).unwrap(), json!([]));
}

#[test]
fn abc_manifest_compiles_to_literal_graph() {
    let graph = compile(&abc_manifest());
    assert_eq!(serde_json::to_value(&graph).unwrap(), json!(["a.js", 2, "b.js", "c.js"]));
}

#[test]
fn abc_manifest_with_dynamic_imports() {
    let graph = compile_with(&abc_manifest(), &GraphOptions::default().with_dynamic_imports(true));
    assert_eq!(
        serde_json::to_value(&graph).unwrap(),
        json!(["a.js", 3, 5, "b.js", 5, "c.js"])
    );
    assert_eq!(graph.dependencies("b.js"), vec!["c.js"]);
    assert_eq!(graph.preload_order("a.js"), vec!["b.js", "c.js"]);
}

#[test]
fn shared_dependency_is_written_once() {
    let mut manifest = Manifest::new();
    for page in ["home.js", "about.js", "blog.js"] {
        manifest = manifest.with_bundle(page, BundleDescriptor::new(100).with_imports(["core.js"]));
    }
    manifest = manifest.with_bundle("core.js", BundleDescriptor::new(900));

    let graph = compile(&manifest);
    let core_names = graph
        .entries()
        .iter()
        .filter(|entry| entry.as_name() == Some("core.js"))
        .count();
    assert_eq!(core_names, 1);
    assert_eq!(
        graph,
        BundleGraph::new(vec![
            "home.js".into(),
            6.into(),
            "about.js".into(),
            6.into(),
            "blog.js".into(),
            6.into(),
            "core.js".into(),
        ])
    );
}

#[test]
fn preload_order_walks_transitive_imports() {
    let manifest = Manifest::from_value(json!({
        "bundles": {
            "entry.js": { "size": 1, "imports": ["router.js", "ui.js"] },
            "router.js": { "size": 1, "imports": ["core.js"] },
            "ui.js": { "size": 1, "imports": ["core.js", "icons.js"] },
            "icons.js": { "size": 1 },
            "core.js": { "size": 1 }
        }
    }))
    .unwrap();
    let graph = compile(&manifest);

    assert_eq!(
        graph.preload_order("entry.js"),
        vec!["router.js", "ui.js", "core.js", "icons.js"]
    );
    assert!(graph.preload_order("core.js").is_empty());
    assert!(graph.preload_order("unknown.js").is_empty());
}

#[test]
fn embedded_graph_round_trips_through_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("q-manifest.json");
    let mut manifest = abc_manifest();
    manifest.extra.insert("version".to_string(), json!("1"));
    manifest.embed_bundle_graph(&GraphOptions::default());
    std::fs::write(&path, manifest.to_json_pretty().unwrap()).unwrap();

    let loaded = Manifest::from_path(&path).unwrap();
    assert_eq!(loaded, manifest);
    assert_eq!(
        loaded.bundle_graph.map(BundleGraph::into_entries),
        Some(vec![
            GraphEntry::from("a.js"),
            GraphEntry::from(2),
            GraphEntry::from("b.js"),
            GraphEntry::from("c.js"),
        ])
    );
}

/// Manifests over a small name pool, edges allowed to dangle.
fn manifest_strategy() -> impl Strategy<Value = Manifest> {
    let name = prop::sample::select(vec!["a.js", "b.js", "c.js", "d.js", "e.js", "f.js"]);
    prop::collection::vec(
        (
            name.clone(),
            prop::collection::vec(name.clone(), 0..4),
            prop::collection::vec(name, 0..4),
        ),
        0..8,
    )
    .prop_map(|bundles| {
        bundles
            .into_iter()
            .fold(Manifest::new(), |manifest, (name, imports, dynamic)| {
                manifest.with_bundle(
                    name,
                    BundleDescriptor::new(1)
                        .with_imports(imports)
                        .with_dynamic_imports(dynamic),
                )
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every reference points at a bundle name inside the graph.
    #[test]
    fn prop_references_point_at_names(manifest in manifest_strategy(), dynamic in any::<bool>()) {
        let graph = compile_with(&manifest, &GraphOptions::default().with_dynamic_imports(dynamic));
        for entry in graph.entries() {
            if let Some(index) = entry.as_index() {
                prop_assert!(graph.entries().get(index).and_then(GraphEntry::as_name).is_some());
            }
        }
    }

    /// Each manifest bundle appears exactly once, in manifest order.
    #[test]
    fn prop_names_follow_manifest_order(manifest in manifest_strategy()) {
        let graph = compile(&manifest);
        let names: Vec<&str> = graph.bundles().map(|(_, name)| name).collect();
        let expected: Vec<&str> = manifest.bundles.keys().map(String::as_str).collect();
        prop_assert_eq!(names, expected);
    }

    /// Decoding recovers the deduplicated, resolvable static imports.
    #[test]
    fn prop_dependencies_decode_imports(manifest in manifest_strategy()) {
        let graph = compile(&manifest);
        for (name, bundle) in &manifest.bundles {
            let mut expected: Vec<&str> = Vec::new();
            for target in &bundle.imports {
                if target != name
                    && manifest.bundles.contains_key(target)
                    && !expected.contains(&target.as_str())
                {
                    expected.push(target);
                }
            }
            prop_assert_eq!(graph.dependencies(name), expected);
        }
    }

    #[test]
    fn prop_compile_is_deterministic(manifest in manifest_strategy()) {
        prop_assert_eq!(compile(&manifest), compile(&manifest));
    }
}
