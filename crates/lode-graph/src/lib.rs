//! # lode-graph
//!
//! Compiles a build manifest into the flat bundle graph a runtime prefetcher
//! walks to decide what to load next.
//!
//! ```
//! use lode_graph::{compile, Manifest};
//!
//! let manifest = Manifest::from_json(r#"{
//!     "bundles": {
//!         "a.js": { "size": 0, "imports": ["b.js"], "dynamicImports": ["c.js"] },
//!         "b.js": { "size": 0, "dynamicImports": ["c.js"] },
//!         "c.js": { "size": 0 }
//!     }
//! }"#)
//! .unwrap();
//!
//! let graph = compile(&manifest);
//! assert_eq!(
//!     serde_json::to_value(&graph).unwrap(),
//!     serde_json::json!(["a.js", 2, "b.js", "c.js"])
//! );
//! ```

pub mod compile;
pub mod error;
pub mod graph;
pub mod manifest;

pub use compile::{GraphOptions, compile, compile_with};
pub use error::{GraphError, Result};
pub use graph::{BundleGraph, GraphEntry};
pub use manifest::{BundleDescriptor, Manifest};
