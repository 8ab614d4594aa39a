use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a path valid on Windows-based systems
pub const WINDOWS_PATTERN: &str = r"^(?P<drive>[a-zA-Z]:)?(?P<path>(?:[\\]?(?:[\w !#()-]+|[.]{1,2})+)*[\\])?(?P<filename>(?:[.]?[\w !#()-]+)+)?[.]?$";
/// Matches a path valid on Unix-based systems
pub const UNIX_PATTERN: &str = r"^(/[^/ ]*)+/?$";

static WINDOWS: Lazy<Regex> =
    Lazy::new(|| Regex::new(WINDOWS_PATTERN).expect("windows path pattern compiles"));
static UNIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(UNIX_PATTERN).expect("unix path pattern compiles"));

/// Which OS path grammar a path string matches
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum PathSyntax {
    #[default]
    None,
    Windows,
    Unix,
}

/// Windows grammar is checked first
pub fn path_syntax(path: &str) -> PathSyntax {
    if WINDOWS.is_match(path) {
        PathSyntax::Windows
    } else if UNIX.is_match(path) {
        PathSyntax::Unix
    } else {
        PathSyntax::None
    }
}

/// True if `path` is a valid Windows or Unix path string
pub fn path_is_valid(path: &str) -> bool {
    path_syntax(path) != PathSyntax::None
}

/// `\` for Windows, `/` otherwise
pub fn separator(syntax: PathSyntax) -> char {
    match syntax {
        PathSyntax::Windows => '\\',
        PathSyntax::Unix | PathSyntax::None => '/',
    }
}

/// Separator of the OS this was compiled for
pub fn native_separator() -> char {
    std::path::MAIN_SEPARATOR
}

/// Splits `path` into its parts using the separator of its detected syntax
///
/// `each/one/is/a/part` -> `["each", "one", "is", "a", "part"]`
pub fn path_parts(path: &str) -> Vec<&str> {
    path_parts_with(path, path_syntax(path))
}

/// Splits `path` on the separator of `syntax`. `PathSyntax::None` keeps the path whole
pub fn path_parts_with(path: &str, syntax: PathSyntax) -> Vec<&str> {
    match syntax {
        PathSyntax::None => vec![path],
        syntax => path.split(separator(syntax)).collect(),
    }
}
