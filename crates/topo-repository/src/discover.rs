use std::path::{Path, PathBuf};

use crate::{EnvOverrides, RepoError};

/// Result of locating a git directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredRepo {
    pub git_dir: PathBuf,
    pub common_dir: PathBuf,
    pub work_tree: Option<PathBuf>,
}

/// Discover a git directory by walking up from `start`.
///
/// 1. `$GIT_DIR` set → open it directly.
/// 2. Walk up from `start`, stopping at any ceiling directory:
///    a. `.git/` directory → found
///    b. `.git` file (`gitdir: <path>`) → follow the redirect
///    c. otherwise go to the parent
pub fn discover_git_dir_with_env(
    start: &Path,
    env: &EnvOverrides,
) -> Result<DiscoveredRepo, RepoError> {
    if let Some(ref git_dir) = env.git_dir {
        let git_dir = if git_dir.is_absolute() {
            git_dir.clone()
        } else {
            start.join(git_dir)
        };
        return open_git_dir(&git_dir);
    }

    let start =
        std::fs::canonicalize(start).map_err(|_| RepoError::NotFound(start.to_path_buf()))?;

    let ceilings: Vec<PathBuf> = env
        .ceiling_directories
        .iter()
        .filter_map(|p| std::fs::canonicalize(p).ok())
        .collect();

    let mut current = start.clone();
    loop {
        if ceilings.contains(&current) {
            tracing::debug!(ceiling = %current.display(), "reached ceiling directory");
            return Err(RepoError::NotFound(start));
        }

        let dot_git = current.join(".git");

        if dot_git.is_dir() {
            let common_dir = resolve_common_dir(&dot_git);
            return Ok(DiscoveredRepo {
                git_dir: dot_git,
                common_dir,
                work_tree: Some(current),
            });
        }

        if dot_git.is_file() {
            let target = parse_gitdir_file(&dot_git)?;
            let target = if target.is_absolute() {
                target
            } else {
                current.join(&target)
            };
            let git_dir =
                std::fs::canonicalize(&target).map_err(|e| RepoError::InvalidGitDir {
                    path: dot_git.clone(),
                    reason: format!("cannot resolve gitdir target: {e}"),
                })?;
            let common_dir = resolve_common_dir(&git_dir);
            return Ok(DiscoveredRepo {
                git_dir,
                common_dir,
                work_tree: Some(current),
            });
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return Err(RepoError::NotFound(start)),
        }
    }
}

/// Open a known git directory path directly.
pub(crate) fn open_git_dir(git_dir: &Path) -> Result<DiscoveredRepo, RepoError> {
    let git_dir =
        std::fs::canonicalize(git_dir).map_err(|_| RepoError::NotFound(git_dir.to_path_buf()))?;
    if !git_dir.is_dir() {
        return Err(RepoError::InvalidGitDir {
            path: git_dir,
            reason: "not a directory".to_string(),
        });
    }

    let common_dir = resolve_common_dir(&git_dir);
    let work_tree = git_dir
        .parent()
        .filter(|parent| parent.join(".git") == git_dir)
        .map(Path::to_path_buf);

    Ok(DiscoveredRepo {
        git_dir,
        common_dir,
        work_tree,
    })
}

/// Parse a `.git` file containing `gitdir: <path>`.
pub fn parse_gitdir_file(path: &Path) -> Result<PathBuf, RepoError> {
    let content = std::fs::read_to_string(path).map_err(|e| RepoError::InvalidGitDir {
        path: path.to_path_buf(),
        reason: format!("cannot read .git file: {e}"),
    })?;
    let content = content.trim();
    let target = content
        .strip_prefix("gitdir: ")
        .ok_or_else(|| RepoError::InvalidGitDir {
            path: path.to_path_buf(),
            reason: format!("expected 'gitdir: <path>', got: {content}"),
        })?;
    Ok(PathBuf::from(target))
}

/// If the git dir has a `commondir` file it names the shared directory;
/// otherwise the git dir is its own common dir.
fn resolve_common_dir(git_dir: &Path) -> PathBuf {
    let commondir_file = git_dir.join("commondir");
    if let Ok(content) = std::fs::read_to_string(&commondir_file) {
        let resolved = git_dir.join(content.trim());
        return std::fs::canonicalize(&resolved).unwrap_or(resolved);
    }
    git_dir.to_path_buf()
}
