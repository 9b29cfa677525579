use std::collections::{BTreeSet, HashMap};

use topo_hash::ObjectId;
use topo_loose::ObjectReader;
use topo_ref::BranchMap;

use crate::GraphError;

/// One commit in the arena. Edges are addresses into the owning
/// [`CommitGraph`], never references, and are always mutual: `p` is in
/// `c.parents` exactly when `c` is in `p.children`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    id: ObjectId,
    /// Declared order, duplicates removed.
    parents: Vec<ObjectId>,
    children: BTreeSet<ObjectId>,
    branches: Vec<String>,
}

impl CommitNode {
    fn new(id: ObjectId) -> Self {
        Self {
            id,
            parents: Vec::new(),
            children: BTreeSet::new(),
            branches: Vec::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// Children in ascending address order.
    pub fn children(&self) -> &BTreeSet<ObjectId> {
        &self.children
    }

    /// Branches pointing directly at this commit, unsorted.
    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Every commit reachable from a branch tip, keyed by address.
#[derive(Debug, Clone, Default)]
pub struct CommitGraph {
    nodes: HashMap<ObjectId, CommitNode>,
    roots: Vec<ObjectId>,
}

impl CommitGraph {
    pub fn get(&self, oid: &ObjectId) -> Option<&CommitNode> {
        self.nodes.get(oid)
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.nodes.contains_key(oid)
    }

    /// Commits with no parents, in the order they were expanded.
    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CommitNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of parent→child edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.parents.len()).sum()
    }
}

/// Materializes the ancestry graph by expanding commits from the branch tips.
pub struct GraphBuilder<'r, R: ObjectReader + ?Sized> {
    reader: &'r R,
}

impl<'r, R: ObjectReader + ?Sized> GraphBuilder<'r, R> {
    pub fn new(reader: &'r R) -> Self {
        Self { reader }
    }

    /// Build the graph reachable from every tip in `branches`.
    ///
    /// A commit enters the arena the moment it is first seen, as a tip or as
    /// someone's parent, and only then goes on the work list. Each address is
    /// therefore read from the object store exactly once, however many
    /// branches or children lead to it.
    pub fn build(&self, branches: &BranchMap) -> Result<CommitGraph, GraphError> {
        let mut graph = CommitGraph::default();
        let mut pending: Vec<ObjectId> = Vec::with_capacity(branches.len());

        for tip in branches.tips() {
            if !graph.nodes.contains_key(tip) {
                graph.nodes.insert(*tip, CommitNode::new(*tip));
                pending.push(*tip);
            }
        }
        // Expand smallest tip first so reads happen in a stable order.
        pending.sort_unstable_by(|a, b| b.cmp(a));

        while let Some(oid) = pending.pop() {
            let mut parents = self.reader.read_parents(&oid)?;
            // One edge per distinct parent, first declaration wins.
            let mut seen = BTreeSet::new();
            parents.retain(|p| seen.insert(*p));

            for parent in &parents {
                graph
                    .nodes
                    .entry(*parent)
                    .or_insert_with(|| {
                        pending.push(*parent);
                        CommitNode::new(*parent)
                    })
                    .children
                    .insert(oid);
            }

            let node = graph
                .nodes
                .entry(oid)
                .or_insert_with(|| CommitNode::new(oid));
            node.branches = branches.names(&oid).to_vec();
            if parents.is_empty() {
                graph.roots.push(oid);
            }
            node.parents = parents;
        }

        tracing::debug!(
            commits = graph.len(),
            roots = graph.roots.len(),
            edges = graph.edge_count(),
            "built commit graph"
        );
        Ok(graph)
    }
}
