use std::{fs, path::Path};

/// What a path currently points at
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum PathKind {
    #[default]
    None,
    File,
    Directory,
}

/// Follows symlinks, a dangling link is `PathKind::None`
pub fn path_kind(path: impl AsRef<Path>) -> PathKind {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => PathKind::File,
        Ok(metadata) if metadata.is_dir() => PathKind::Directory,
        _ => PathKind::None,
    }
}

/// A file or directory exists at `path`
pub fn path_exists(path: impl AsRef<Path>) -> bool {
    path_kind(path) != PathKind::None
}

/// `path` itself is a symbolic link
pub fn is_symlink(path: impl AsRef<Path>) -> bool {
    fs::symlink_metadata(path)
        .map(|metadata| metadata.file_type().is_symlink())
        .unwrap_or(false)
}
