use std::collections::HashMap;

use topo_hash::ObjectId;

use crate::{CommitGraph, CommitNode, GraphError};

/// Order the graph so that every child comes before all of its parents.
///
/// Kahn's algorithm run from the roots toward the tips with a LIFO ready
/// stack. Roots are pushed in ascending address order and each finished
/// commit releases its children in ascending order; a child is released
/// once its last parent edge has been consumed. The finished list is then
/// reversed, so tips come first and roots last, and among commits with no
/// ordering between them the smaller address is listed first.
pub fn topo_sort(graph: &CommitGraph) -> Result<Vec<&CommitNode>, GraphError> {
    // Unconsumed parent edges per commit.
    let mut remaining: HashMap<ObjectId, usize> = graph
        .nodes()
        .map(|node| (node.id(), node.parents().len()))
        .collect();

    let mut ready: Vec<&CommitNode> = graph
        .roots()
        .iter()
        .filter_map(|oid| graph.get(oid))
        .collect();
    ready.sort_unstable_by_key(|node| node.id());

    let mut finished: Vec<&CommitNode> = Vec::with_capacity(graph.len());
    while let Some(node) = ready.pop() {
        finished.push(node);
        for child in node.children() {
            let Some(count) = remaining.get_mut(child) else {
                continue;
            };
            *count -= 1;
            if *count == 0 {
                if let Some(child) = graph.get(child) {
                    ready.push(child);
                }
            }
        }
    }

    if finished.len() != graph.len() {
        return Err(GraphError::Cycle {
            unsorted: graph.len() - finished.len(),
        });
    }

    finished.reverse();
    tracing::debug!(commits = finished.len(), "topologically sorted");
    Ok(finished)
}
