//! Loose object storage, read side only.
//!
//! Each loose object lives at `.git/objects/XX/YYYY...` where `XX` is the
//! first byte of the address in hex and `YYYY...` is the rest. The file
//! content is zlib-compressed `"<type> <size>\0<content>"`. Only commit
//! records are interpreted, and only for their `parent` headers.

mod header;
mod read;

pub use header::{parse_commit_parents, parse_header};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use topo_hash::ObjectId;

/// Source of commit ancestry.
///
/// `read_parents` returns the parent addresses of one commit in declared
/// order. An address with no backing record yields an empty list: the
/// commit is treated as a root (shallow or pruned history).
pub trait ObjectReader {
    fn read_parents(&self, oid: &ObjectId) -> Result<Vec<ObjectId>, LooseError>;
}

/// In-memory ancestry, used by fixtures and benches.
impl ObjectReader for HashMap<ObjectId, Vec<ObjectId>> {
    fn read_parents(&self, oid: &ObjectId) -> Result<Vec<ObjectId>, LooseError> {
        Ok(self.get(oid).cloned().unwrap_or_default())
    }
}

/// Interface to the loose object directory (`.git/objects/`).
#[derive(Debug, Clone)]
pub struct LooseObjectStore {
    objects_dir: PathBuf,
}

impl LooseObjectStore {
    /// Open the loose object store at the given path.
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Get the file path for a given address.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.loose_path())
    }
}

/// Errors from loose object operations. Every variant is fatal to a run;
/// a missing object is not an error.
#[derive(Debug, thiserror::Error)]
pub enum LooseError {
    #[error("corrupt loose object {oid}: {reason}")]
    Corrupt { oid: ObjectId, reason: String },

    #[error("decompression error for {oid}: {source}")]
    Decompress {
        oid: ObjectId,
        #[source]
        source: std::io::Error,
    },

    #[error("object {oid} is a {kind}, not a commit")]
    NotACommit { oid: ObjectId, kind: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
