//! File discovery: recursively enumerate files under a root directory and
//! return the subset matching suffix/directory include/exclude rules, as
//! paths relative to the root.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("root directory does not exist or is not a directory: {0}")]
    NotFound(PathBuf),
    #[error("cannot express {path} relative to root {root}")]
    PathResolution { root: PathBuf, path: PathBuf },
    #[error("traversal failed under {root}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// The suffix used for filter matching: the file name from its final dot
/// (inclusive), or the whole file name when there is no extension, so that
/// literal names like `Dockerfile` can be listed in the include set.
pub fn file_suffix(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[idx..],
        _ => file_name,
    }
}

/// Walks `root` and returns the relative paths of all regular files whose
/// suffix is in `include`, whose suffix is not in `exclude_suffixes`, and
/// none of whose path segments (directories or the file name itself) appear
/// in `exclude_dirs`.
///
/// An empty result is a normal outcome, not an error. Any traversal or
/// relative-path failure aborts the whole call rather than returning a
/// silently truncated set.
pub fn discover(
    root: &Path,
    include: &HashSet<String>,
    exclude_suffixes: &HashSet<String>,
    exclude_dirs: &HashSet<String>,
) -> Result<BTreeSet<PathBuf>, DiscoverError> {
    if !root.is_dir() {
        return Err(DiscoverError::NotFound(root.to_path_buf()));
    }

    let mut found = BTreeSet::new();
    if include.is_empty() {
        info!(root = %root.display(), "Include set is empty, nothing can match");
        return Ok(found);
    }

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| DiscoverError::Walk {
            root: root.to_path_buf(),
            source: e,
        })?;

        // Path-level is_file follows symlinks, so a symlink to a regular
        // file counts as a file. Directory symlinks are not descended into.
        if !entry.path().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| DiscoverError::PathResolution {
                root: root.to_path_buf(),
                path: entry.path().to_path_buf(),
            })?
            .to_path_buf();

        let Some(name) = relative.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let suffix = file_suffix(name);
        if !include.contains(suffix) || exclude_suffixes.contains(suffix) {
            continue;
        }

        let in_excluded_dir = relative.components().any(|c| {
            c.as_os_str()
                .to_str()
                .is_some_and(|segment| exclude_dirs.contains(segment))
        });
        if in_excluded_dir {
            debug!(path = %relative.display(), "Skipping file under excluded directory");
            continue;
        }

        found.insert(relative);
    }

    info!(root = %root.display(), count = found.len(), "Discovery complete");
    debug!(?found, "Discovered files");
    Ok(found)
}
