use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Result, SourceError};

/// A regular file found under the input root
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    /// `/`-separated path relative to the root
    pub relative: String,

    pub path: PathBuf,
}

/// Recursively list regular files under `root`, sorted by relative path.
/// Symlinks are listed neither as files nor followed into.
pub fn walk(root: &Path) -> Result<Vec<SourceFile>> {
    if !root.is_dir() {
        return Err(SourceError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let Some(relative) = to_slash(relative) else {
            tracing::warn!("Skipping non UTF-8 path: {}", entry.path().display());
            continue;
        };

        files.push(SourceFile {
            relative,
            path: entry.into_path(),
        });
    }

    // Sort for determinism
    files.sort();

    Ok(files)
}

fn to_slash(path: &Path) -> Option<String> {
    let parts = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_walk_sorted_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pods/etcd-ip-10-0-187-218")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("pods/etcd-ip-10-0-187-218/current.log"), "log").unwrap();
        fs::write(root.join("b.yaml"), "b").unwrap();
        fs::write(root.join("a.yaml"), "a").unwrap();

        let files = walk(root).unwrap();
        let relative: Vec<_> = files.iter().map(|f| f.relative.as_str()).collect();

        assert_eq!(
            relative,
            vec!["a.yaml", "b.yaml", "pods/etcd-ip-10-0-187-218/current.log"]
        );
        assert_eq!(files[0].path, root.join("a.yaml"));
    }

    #[test]
    fn test_walk_rejects_file_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("single.log");
        fs::write(&file, "x").unwrap();

        assert!(matches!(walk(&file), Err(SourceError::NotADirectory(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("real.log"), "x").unwrap();
        std::os::unix::fs::symlink(root.join("real.log"), root.join("link.log")).unwrap();

        let files = walk(root).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative, "real.log");
    }
}
