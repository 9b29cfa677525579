use std::fs;
use std::path::{Path, PathBuf};

use bstr::ByteSlice;
use topo_hash::ObjectId;

use crate::{BranchMap, RefError};

/// Enumerates the branch pointer files under a heads directory.
#[derive(Debug, Clone)]
pub struct BranchScanner {
    heads_dir: PathBuf,
}

impl BranchScanner {
    pub fn new(heads_dir: impl AsRef<Path>) -> Self {
        Self {
            heads_dir: heads_dir.as_ref().to_path_buf(),
        }
    }

    pub fn heads_dir(&self) -> &Path {
        &self.heads_dir
    }

    /// Read every branch pointer and group the names by target.
    ///
    /// A heads directory that does not exist yields an empty map.
    pub fn scan(&self) -> Result<BranchMap, RefError> {
        let mut files = Vec::new();
        collect_branch_files(&self.heads_dir, &mut files)?;

        let mut map = BranchMap::new();
        for path in files {
            let name = branch_name(&self.heads_dir, &path)?;
            let target = read_target(&path, &name)?;
            tracing::debug!(branch = %name, %target, "found branch");
            map.insert(target, name);
        }
        Ok(map)
    }
}

fn collect_branch_files(dir: &Path, result: &mut Vec<PathBuf>) -> Result<(), RefError> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(RefError::IoPath {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    };

    for entry in entries {
        let entry = entry.map_err(|e| RefError::IoPath {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_branch_files(&path, result)?;
        } else if path.is_file() {
            // In-flight updates by a concurrent writer
            if path.extension().is_some_and(|ext| ext == "lock") {
                continue;
            }
            result.push(path);
        }
    }
    Ok(())
}

/// Branch name: the path relative to the heads directory, `/`-joined.
fn branch_name(heads_dir: &Path, path: &Path) -> Result<String, RefError> {
    let rel = path
        .strip_prefix(heads_dir)
        .map_err(|_| RefError::InvalidName(path.to_path_buf()))?;
    let parts = rel
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| RefError::InvalidName(path.to_path_buf()))?;
    Ok(parts.join("/"))
}

fn read_target(path: &Path, name: &str) -> Result<ObjectId, RefError> {
    let contents = fs::read(path).map_err(|e| RefError::IoPath {
        path: path.to_path_buf(),
        source: e,
    })?;
    let invalid = |reason: String| RefError::InvalidTarget {
        name: name.to_string(),
        reason,
    };
    let hex = contents
        .trim()
        .to_str()
        .map_err(|_| invalid("invalid UTF-8".into()))?;
    ObjectId::from_hex(hex).map_err(|e| invalid(e.to_string()))
}
