//! Flat bundle graph consumed by the runtime prefetcher.
//!
//! The graph is one JSON array: each bundle name is followed by the slot
//! indexes of the names it depends on.
//!
//! ```text
//! ["a.js", 2, "b.js", "c.js"]
//!    0     1    2       3        a.js -> slot 2 (b.js)
//! ```

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// One slot of a [`BundleGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphEntry {
    /// Slot index of a dependency's name
    Index(usize),
    /// Start of a bundle's record
    Name(String),
}

impl GraphEntry {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            GraphEntry::Name(name) => Some(name),
            GraphEntry::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            GraphEntry::Index(index) => Some(*index),
            GraphEntry::Name(_) => None,
        }
    }
}

impl From<&str> for GraphEntry {
    fn from(name: &str) -> Self {
        GraphEntry::Name(name.to_string())
    }
}

impl From<usize> for GraphEntry {
    fn from(index: usize) -> Self {
        GraphEntry::Index(index)
    }
}

/// Compiled graph; see the module docs for the encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleGraph(Vec<GraphEntry>);

impl BundleGraph {
    pub fn new(entries: Vec<GraphEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[GraphEntry] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<GraphEntry> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bundle names with their slot indexes, in graph order.
    pub fn bundles(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.as_name().map(|name| (slot, name)))
    }

    /// Slot index of `name`, if the graph contains it.
    pub fn slot(&self, name: &str) -> Option<usize> {
        self.bundles()
            .find(|(_, bundle)| *bundle == name)
            .map(|(slot, _)| slot)
    }

    /// Direct dependencies of `name`, in compiled order.
    ///
    /// ```
    /// use lode_graph::{BundleGraph, GraphEntry};
    ///
    /// let graph = BundleGraph::new(vec!["a.js".into(), 2.into(), "b.js".into()]);
    /// assert_eq!(graph.dependencies("a.js"), vec!["b.js"]);
    /// assert!(graph.dependencies("b.js").is_empty());
    /// ```
    pub fn dependencies(&self, name: &str) -> Vec<&str> {
        match self.slot(name) {
            Some(slot) => self.dependencies_at(slot).collect(),
            None => Vec::new(),
        }
    }

    /// Every bundle reachable from `name`, breadth-first, excluding `name`.
    pub fn preload_order(&self, name: &str) -> Vec<&str> {
        let slots: FxHashMap<&str, usize> =
            self.bundles().map(|(slot, bundle)| (bundle, slot)).collect();
        let Some(&start) = slots.get(name) else {
            return Vec::new();
        };

        let mut order = Vec::new();
        let mut seen = FxHashSet::default();
        seen.insert(start);
        let mut queue = VecDeque::from([start]);

        while let Some(slot) = queue.pop_front() {
            for dep in self.dependencies_at(slot) {
                let Some(&dep_slot) = slots.get(dep) else {
                    continue;
                };
                if seen.insert(dep_slot) {
                    order.push(dep);
                    queue.push_back(dep_slot);
                }
            }
        }

        order
    }

    /// Decode the references that follow the name at `slot`.
    fn dependencies_at(&self, slot: usize) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .skip(slot + 1)
            .map_while(GraphEntry::as_index)
            .filter_map(|index| self.0.get(index).and_then(GraphEntry::as_name))
    }
}

impl From<Vec<GraphEntry>> for BundleGraph {
    fn from(entries: Vec<GraphEntry>) -> Self {
        Self(entries)
    }
}

impl<'a> IntoIterator for &'a BundleGraph {
    type Item = &'a GraphEntry;
    type IntoIter = std::slice::Iter<'a, GraphEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chain() -> BundleGraph {
        // a -> b, c; b -> c; c -> a
        BundleGraph::new(vec![
            "a.js".into(),
            3.into(),
            5.into(),
            "b.js".into(),
            5.into(),
            "c.js".into(),
            0.into(),
        ])
    }

    #[test]
    fn serializes_as_flat_array() {
        let graph = BundleGraph::new(vec!["a.js".into(), 2.into(), "b.js".into()]);
        assert_eq!(serde_json::to_value(&graph).unwrap(), json!(["a.js", 2, "b.js"]));

        let parsed: BundleGraph = serde_json::from_value(json!(["a.js", 2, "b.js"])).unwrap();
        assert_eq!(parsed, graph);
    }

    #[test]
    fn dependencies_decode_slots() {
        let graph = chain();
        assert_eq!(graph.dependencies("a.js"), vec!["b.js", "c.js"]);
        assert_eq!(graph.dependencies("c.js"), vec!["a.js"]);
        assert!(graph.dependencies("missing.js").is_empty());
    }

    #[test]
    fn preload_order_is_breadth_first_and_terminates_on_cycles() {
        let graph = chain();
        assert_eq!(graph.preload_order("b.js"), vec!["c.js", "a.js"]);
        assert_eq!(graph.preload_order("a.js"), vec!["b.js", "c.js"]);
    }

    #[test]
    fn out_of_range_references_are_ignored() {
        let graph = BundleGraph::new(vec!["a.js".into(), 9.into(), 1.into()]);
        assert!(graph.dependencies("a.js").is_empty());
    }

    #[test]
    fn bundles_lists_name_slots() {
        let slots: Vec<_> = chain().bundles().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![0, 3, 5]);
    }
}
