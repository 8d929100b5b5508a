//! Errors of the command line front end.
//!
//! Analysis itself cannot fail; these only cover getting header text in and
//! the rendered report out.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report: {0}")]
    Write(#[from] io::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn read(path: impl Into<String>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[test]
fn test_read_display() {
    let e = Error::read("headers.txt", io::Error::new(io::ErrorKind::NotFound, "missing"));
    let s = e.to_string();
    assert!(s.contains("headers.txt"));
    assert!(s.contains("missing"));
}
