use std::path::PathBuf;

use thiserror::Error;

/// A single problem found while resolving includes. Messages follow the
/// `<file>:<line>: error: ...` shape so editors and build logs can jump
/// straight to the offending line.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{}: error: circular @include detected", .path.display())]
    CircularInclude { path: PathBuf },

    #[error("{}:{line}: error: unterminated @include directive", .path.display())]
    MalformedDirective { path: PathBuf, line: usize },

    #[error("{}:{line}: error: file not found: {name}", .path.display())]
    IncludeNotFound {
        path: PathBuf,
        line: usize,
        name: String,
    },

    #[error("{}: error: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
