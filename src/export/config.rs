//! Export configuration

use crate::paths::PathSource;
use std::path::PathBuf;

/// Configuration for one playlist-generation run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Apple Music library export to read
    pub library_path: PathBuf,

    /// Where the generated playlist document is written
    pub output_path: PathBuf,

    /// Directory relative music paths are resolved against
    pub base_dir: PathBuf,

    /// Playlists to generate, in output order
    pub playlists: Vec<PlaylistRequest>,

    /// Warn about library tracks that are not local files
    pub warnings: bool,

    /// Fail when a requested file is not in the library
    pub strict: bool,

    /// Output encoding
    pub format: OutputFormat,
}

/// One playlist to generate and where its file list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRequest {
    pub name: String,
    pub description: String,
    pub source: PathSource,
}

/// Property-list encoding of the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// XML plist, what Apple Music's "Import Playlist" expects
    #[default]
    Xml,

    /// Binary plist
    Binary,
}

impl ExportConfig {
    /// Create a new configuration resolving relative paths against `base_dir`
    pub fn new(library_path: PathBuf, output_path: PathBuf, base_dir: PathBuf) -> Self {
        Self {
            library_path,
            output_path,
            base_dir,
            playlists: Vec::new(),
            warnings: true,
            strict: false,
            format: OutputFormat::Xml,
        }
    }

    /// Add a playlist to generate
    pub fn with_playlist(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        source: PathSource,
    ) -> Self {
        self.playlists.push(PlaylistRequest {
            name: name.into(),
            description: description.into(),
            source,
        });
        self
    }

    /// Enable or suppress skipped-track warnings
    pub fn with_warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    /// Set strict matching
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set output encoding
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
