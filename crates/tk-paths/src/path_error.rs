use std::io;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathError {
    Io { kind: io::ErrorKind, message: String },
}

impl From<io::Error> for PathError {
    fn from(err: io::Error) -> Self {
        PathError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
