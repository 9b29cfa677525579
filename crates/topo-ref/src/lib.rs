//! Branch pointers for topo-order-commits.
//!
//! Branches are loose files under `.git/refs/heads/`, each holding the hex
//! address of the commit it points at. `BranchScanner` walks that tree and
//! groups branch names by target address into a `BranchMap`.

mod error;
mod scan;

pub use error::RefError;
pub use scan::BranchScanner;

use std::collections::hash_map;
use std::collections::HashMap;

use topo_hash::ObjectId;

/// Commit address → names of the branches pointing at it.
///
/// Name order within an entry follows discovery order and carries no
/// meaning; consumers sort when they need to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchMap {
    targets: HashMap<ObjectId, Vec<String>>,
}

impl BranchMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that branch `name` points at `target`.
    pub fn insert(&mut self, target: ObjectId, name: impl Into<String>) {
        let name = name.into();
        let names = self.targets.entry(target).or_default();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    /// Branch names pointing at `oid`; empty if none do.
    pub fn names(&self, oid: &ObjectId) -> &[String] {
        self.targets.get(oid).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct branch tips, each exactly once.
    pub fn tips(&self) -> impl Iterator<Item = &ObjectId> {
        self.targets.keys()
    }

    /// Number of distinct tips.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, ObjectId, Vec<String>> {
        self.targets.iter()
    }
}

impl FromIterator<(ObjectId, String)> for BranchMap {
    fn from_iter<I: IntoIterator<Item = (ObjectId, String)>>(iter: I) -> Self {
        let mut map = BranchMap::new();
        for (target, name) in iter {
            map.insert(target, name);
        }
        map
    }
}
