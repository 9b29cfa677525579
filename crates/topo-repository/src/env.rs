use std::path::PathBuf;

/// Git environment variables that influence where the repository is.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    /// GIT_DIR: use this git dir, skip discovery
    pub git_dir: Option<PathBuf>,
    /// GIT_CEILING_DIRECTORIES (colon-separated)
    pub ceiling_directories: Vec<PathBuf>,
    /// GIT_OBJECT_DIRECTORY
    pub object_directory: Option<PathBuf>,
}

impl EnvOverrides {
    /// Read the overrides from the process environment.
    pub fn from_env() -> Self {
        Self {
            git_dir: non_empty_var("GIT_DIR"),
            ceiling_directories: parse_path_list_env("GIT_CEILING_DIRECTORIES"),
            object_directory: non_empty_var("GIT_OBJECT_DIRECTORY"),
        }
    }
}

fn non_empty_var(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Parse a colon-separated (semicolon on Windows) path list from an env var.
fn parse_path_list_env(var: &str) -> Vec<PathBuf> {
    match std::env::var_os(var) {
        Some(val) => split_path_list(&val.to_string_lossy()),
        None => Vec::new(),
    }
}

fn split_path_list(s: &str) -> Vec<PathBuf> {
    let sep = if cfg!(windows) { ';' } else { ':' };
    s.split(sep)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}
