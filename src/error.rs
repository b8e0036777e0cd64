//! Error types for playlist generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the library, building playlists or writing output
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// The library document is not a valid property list
    #[error("Failed to parse library document: {0}")]
    Parse(#[from] plist::Error),

    /// The library document parsed but does not have the expected shape
    #[error("Unexpected library layout: {0}")]
    Schema(String),

    /// Reading an input or writing the output failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding the output document failed while writing it
    #[error("Failed to write playlist document {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },

    /// Strict mode: some requested files are not in the library
    #[error("Playlist '{playlist}': {} file(s) not found in library, first: {:?}", .paths.len(), .paths.first())]
    Unmatched {
        playlist: String,
        paths: Vec<PathBuf>,
    },
}

impl PlaylistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlaylistError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn schema(msg: impl Into<String>) -> Self {
        PlaylistError::Schema(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, PlaylistError>;
