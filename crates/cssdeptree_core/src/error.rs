use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that abort a dependency resolution run.
///
/// A run is all-or-nothing: the first error raised by any branch of the
/// traversal is returned and no partial tree is produced.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A visited stylesheet could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stylesheet imports one of its own ancestors.
    #[error("import cycle detected: {}", display_chain(.chain))]
    Cycle { chain: Vec<PathBuf> },

    #[error("failed to determine current directory: {source}")]
    CurrentDir {
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ResolveError>;

fn display_chain(chain: &[PathBuf]) -> String {
    chain.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(" -> ")
}
