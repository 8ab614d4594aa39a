use crate::{path_is_valid, path_kind, PathError, PathKind};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Number of numbered names `unused_path` tries before falling back to a random id
pub const DEFAULT_MAX_TRIES: usize = 20;

fn is_valid(path: &Path) -> bool {
    path.to_str().is_some_and(path_is_valid)
}

/// Deletes the file or empty directory at `path`.
///
/// Returns `Ok(true)` once nothing exists at `path` (including when nothing existed to begin with) and
/// `Ok(false)` when `path` is not a valid path string.
pub fn delete_path(path: impl AsRef<Path>) -> Result<bool, PathError> {
    let path = path.as_ref();
    let kind = path_kind(path);
    if kind == PathKind::None {
        return Ok(true);
    }
    if !is_valid(path) {
        tracing::debug!(path = %path.display(), "invalid path string, not deleting");
        return Ok(false);
    }

    match kind {
        PathKind::File => fs::remove_file(path)?,
        PathKind::Directory => fs::remove_dir(path)?,
        PathKind::None => {}
    }
    tracing::debug!(path = %path.display(), ?kind, "deleted");
    Ok(true)
}

/// `unused_path_with(path, DEFAULT_MAX_TRIES)`
pub fn unused_path(path: impl AsRef<Path>) -> PathBuf {
    unused_path_with(path, DEFAULT_MAX_TRIES)
}

/// Returns a path that does not currently exist.
///
/// `path` itself when it is free or cannot be numbered (an invalid path string, a root, `..`). Otherwise the first
/// free `name (n).ext` for n in `1..=max_tries`, falling back to `name (<random id>).ext`
pub fn unused_path_with(path: impl AsRef<Path>, max_tries: usize) -> PathBuf {
    let path = path.as_ref();
    if path_kind(path) == PathKind::None || !is_valid(path) {
        return path.to_path_buf();
    }

    // roots and `..` have no name to number
    let (Some(directory), Some(stem)) = (path.parent(), path.file_stem()) else {
        return path.to_path_buf();
    };
    let name = stem.to_string_lossy();
    let extension = path
        .extension()
        .map(|extension| format!(".{}", extension.to_string_lossy()))
        .unwrap_or_default();

    for index in 1..=max_tries {
        let candidate = directory.join(format!("{name} ({index}){extension}"));
        if path_kind(&candidate) == PathKind::None {
            return candidate;
        }
    }

    tracing::debug!(path = %path.display(), max_tries, "numbered names taken, using random id");
    directory.join(format!("{name} ({}){extension}", random_id()))
}

fn random_id() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}
