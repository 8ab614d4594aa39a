mod kind;
mod ops;
mod path_error;
mod syntax;

pub use kind::{is_symlink, path_exists, path_kind, PathKind};
pub use ops::{delete_path, unused_path, unused_path_with, DEFAULT_MAX_TRIES};
pub use path_error::PathError;
pub use syntax::{
    native_separator, path_is_valid, path_parts, path_parts_with, path_syntax, separator,
    PathSyntax, UNIX_PATTERN, WINDOWS_PATTERN,
};
