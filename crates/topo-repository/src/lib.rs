//! Repository discovery for topo-order-commits.
//!
//! Locates the git directory by walking upward from a starting location and
//! exposes the two paths the rest of the pipeline reads from: the branch
//! heads directory and the loose objects directory.

mod discover;
mod env;
mod error;

pub use discover::{discover_git_dir_with_env, parse_gitdir_file, DiscoveredRepo};
pub use env::EnvOverrides;
pub use error::RepoError;

use std::path::{Path, PathBuf};

/// A located repository. Read-only; nothing here writes to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    git_dir: PathBuf,
    common_dir: PathBuf,
    work_tree: Option<PathBuf>,
    objects_dir: PathBuf,
}

impl Repository {
    /// Discover the repository containing `start`, honouring the git
    /// environment variables.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, RepoError> {
        Self::discover_with_env(start, &EnvOverrides::from_env())
    }

    /// Discover with explicit environment overrides (for testing).
    pub fn discover_with_env(
        start: impl AsRef<Path>,
        env: &EnvOverrides,
    ) -> Result<Self, RepoError> {
        let found = discover_git_dir_with_env(start.as_ref(), env)?;
        Ok(Self::from_discovered(found, env))
    }

    /// Open a known git directory, skipping discovery. Object directory
    /// overrides from the environment still apply.
    pub fn open(git_dir: impl AsRef<Path>) -> Result<Self, RepoError> {
        Self::open_with_env(git_dir, &EnvOverrides::from_env())
    }

    /// Open with explicit environment overrides. `env.git_dir` and the
    /// ceilings are ignored; the directory to open is given.
    pub fn open_with_env(
        git_dir: impl AsRef<Path>,
        env: &EnvOverrides,
    ) -> Result<Self, RepoError> {
        let found = discover::open_git_dir(git_dir.as_ref())?;
        Ok(Self::from_discovered(found, env))
    }

    fn from_discovered(found: DiscoveredRepo, env: &EnvOverrides) -> Self {
        let objects_dir = env
            .object_directory
            .clone()
            .unwrap_or_else(|| found.common_dir.join("objects"));
        tracing::debug!(
            git_dir = %found.git_dir.display(),
            objects = %objects_dir.display(),
            "opened repository"
        );
        Self {
            git_dir: found.git_dir,
            common_dir: found.common_dir,
            work_tree: found.work_tree,
            objects_dir,
        }
    }

    /// The `.git` directory (or the directory a `.git` file redirects to).
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Directory holding shared refs and objects. Differs from `git_dir`
    /// only for linked worktrees.
    pub fn common_dir(&self) -> &Path {
        &self.common_dir
    }

    pub fn work_tree(&self) -> Option<&Path> {
        self.work_tree.as_deref()
    }

    /// `refs/heads` under the common dir.
    pub fn heads_dir(&self) -> PathBuf {
        self.common_dir.join("refs").join("heads")
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }
}
