//! Commit ancestry graph, topological order, and listing.
//!
//! The pipeline runs in three stages, each finishing before the next:
//!
//! 1. [`GraphBuilder`] expands every commit reachable from the branch tips
//!    into an arena keyed by address, with mutual parent/child edges.
//! 2. [`topo_sort`] orders the arena so every child precedes its parents,
//!    breaking ties by address.
//! 3. [`Listing`] renders that order one commit per line, inserting
//!    boundary markers wherever a commit is not followed by one of its
//!    parents, so the skipped edges are still written down.

mod graph;
mod render;
mod topo;

pub use graph::{CommitGraph, CommitNode, GraphBuilder};
pub use render::{render, write_listing, Listing};
pub use topo::topo_sort;

/// Errors produced while building or ordering the graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error(transparent)]
    Object(#[from] topo_loose::LooseError),

    #[error("commit graph contains a cycle: {unsorted} commits could not be ordered")]
    Cycle { unsorted: usize },
}
