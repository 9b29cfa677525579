use std::fs;
use std::io::Read;

use bstr::ByteSlice;
use flate2::read::ZlibDecoder;
use topo_hash::ObjectId;

use crate::header::{parse_commit_parents, parse_header};
use crate::{LooseError, LooseObjectStore, ObjectReader};

impl LooseObjectStore {
    /// Check if a loose object exists.
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Read and decompress a loose object.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    /// Returns `Err` if the object exists but cannot be read or inflated.
    pub fn read_raw(&self, oid: &ObjectId) -> Result<Option<Vec<u8>>, LooseError> {
        let path = self.object_path(oid);
        let compressed = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LooseError::Io { path, source: e }),
        };
        decompress_all(&compressed, oid).map(Some)
    }
}

impl ObjectReader for LooseObjectStore {
    fn read_parents(&self, oid: &ObjectId) -> Result<Vec<ObjectId>, LooseError> {
        let Some(data) = self.read_raw(oid)? else {
            tracing::debug!(%oid, "object missing, treating as root");
            return Ok(Vec::new());
        };

        let (kind, size, header_len) = parse_header(oid, &data)?;
        if kind != b"commit" {
            return Err(LooseError::NotACommit {
                oid: *oid,
                kind: kind.to_str_lossy().into_owned(),
            });
        }
        let body = &data[header_len..];
        if body.len() != size {
            return Err(LooseError::Corrupt {
                oid: *oid,
                reason: format!("header declares {size} bytes, found {}", body.len()),
            });
        }

        let parents = parse_commit_parents(oid, body)?;
        tracing::trace!(%oid, parents = parents.len(), "read commit");
        Ok(parents)
    }
}

/// Zlib-decompress the full contents of a loose object file.
fn decompress_all(compressed: &[u8], oid: &ObjectId) -> Result<Vec<u8>, LooseError> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| LooseError::Decompress {
            oid: *oid,
            source: e,
        })?;
    Ok(decompressed)
}
