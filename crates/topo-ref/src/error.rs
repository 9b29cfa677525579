use std::path::PathBuf;

/// Error types for branch enumeration. All are fatal to a run.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("I/O error on {path}: {source}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("non-UTF-8 branch name: {0}")]
    InvalidName(PathBuf),

    #[error("branch {name} does not hold a commit address: {reason}")]
    InvalidTarget { name: String, reason: String },
}
