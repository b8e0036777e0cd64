//! Input path handling
//!
//! Music files may be given on the command line, in a list file, or on
//! stdin. Relative entries are resolved against a base directory so they
//! compare equal to the decoded locations found in the library.

use crate::error::{PlaylistError, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Marker for "read the path list from standard input"
pub const STDIN_MARKER: &str = "-";

/// Where the list of music files for a playlist comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource {
    /// Newline-delimited paths on stdin
    Stdin,

    /// Newline-delimited paths in a list file
    File(PathBuf),

    /// Paths given directly
    Inline(Vec<String>),
}

impl PathSource {
    /// Pick the source from the `--files-from` value and the positional paths.
    /// Inline paths are ignored whenever a list source is given.
    pub fn from_args(files_from: Option<&str>, inline: Vec<String>) -> Self {
        match files_from {
            Some(STDIN_MARKER) => PathSource::Stdin,
            Some(file) if !file.is_empty() => PathSource::File(PathBuf::from(file)),
            _ => PathSource::Inline(inline),
        }
    }
}

/// Make `path` absolute by joining it onto `base_dir` when it is relative.
///
/// Does not touch the filesystem.
pub fn resolve_absolute(base_dir: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Collect the raw (unresolved) path strings for a playlist
pub fn collect_input_paths(source: &PathSource) -> Result<Vec<String>> {
    collect_input_paths_with(source, || io::stdin().lock())
}

/// Like [`collect_input_paths`], reading [`PathSource::Stdin`] from the
/// reader returned by `stdin` instead of the process's standard input
pub fn collect_input_paths_with<R, F>(source: &PathSource, stdin: F) -> Result<Vec<String>>
where
    R: BufRead,
    F: FnOnce() -> R,
{
    match source {
        PathSource::Stdin => read_path_list(stdin()).map_err(|e| PlaylistError::io("<stdin>", e)),
        PathSource::File(path) => {
            let file = File::open(path).map_err(|e| PlaylistError::io(path, e))?;
            let paths =
                read_path_list(BufReader::new(file)).map_err(|e| PlaylistError::io(path, e))?;
            log::debug!("Read {} path(s) from {:?}", paths.len(), path);
            Ok(paths)
        }
        PathSource::Inline(paths) => Ok(paths.clone()),
    }
}

/// Read one path per line. Only the `\n` terminator is removed; any other
/// whitespace (including `\r`) is kept as part of the path.
pub fn read_path_list<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    reader
        .split(b'\n')
        .map(|line| {
            let line = line?;
            String::from_utf8(line).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        })
        .collect()
}
