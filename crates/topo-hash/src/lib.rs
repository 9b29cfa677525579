//! Commit addresses for topo-order-commits.
//!
//! Every commit in the object store is identified by a 40-character SHA-1
//! hex address. This crate provides the `ObjectId` type used as the graph
//! key everywhere else, plus the hex codec behind it.

mod error;
pub mod hex;
mod oid;

pub use error::HashError;
pub use oid::ObjectId;
