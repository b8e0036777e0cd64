//! Main export pipeline orchestration

use super::assembler::serialize;
use super::config::ExportConfig;
use crate::error::Result;
use crate::library::{LibraryIndex, LogReporter, SilentReporter, SkipReporter};
use crate::paths::collect_input_paths;
use crate::playlist::PlaylistBuilder;

/// Counts reported after a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Local tracks found in the library
    pub library_tracks: usize,

    /// Library tracks skipped as non-local
    pub skipped_tracks: usize,

    /// Distinct tracks written to the output
    pub exported_tracks: usize,

    /// Playlists written to the output
    pub playlists: usize,
}

/// Main export pipeline
pub struct ExportPipeline {
    config: ExportConfig,
}

impl ExportPipeline {
    /// Create a new export pipeline
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Run the complete export, reporting skipped tracks per the config
    pub fn export(&self) -> Result<ExportSummary> {
        if self.config.warnings {
            self.export_with(&mut LogReporter)
        } else {
            self.export_with(&mut SilentReporter)
        }
    }

    /// Run the complete export with a caller-supplied skip reporter.
    ///
    /// Nothing is written unless every step before serialization succeeds.
    pub fn export_with(&self, reporter: &mut dyn SkipReporter) -> Result<ExportSummary> {
        log::info!("Generating playlist document");
        log::info!("Output: {:?}", self.config.output_path);

        // Step 1: Gather the requested paths for each playlist
        let mut requests = Vec::with_capacity(self.config.playlists.len());
        for request in &self.config.playlists {
            let paths = collect_input_paths(&request.source)?;
            log::debug!(
                "Playlist '{}': {} path(s) requested",
                request.name,
                paths.len()
            );
            requests.push((request, paths));
        }

        // Step 2: Index the library
        let index = LibraryIndex::open(&self.config.library_path, reporter)?;

        // Step 3: Match paths to tracks
        let mut builder =
            PlaylistBuilder::new(&index, &self.config.base_dir).with_strict(self.config.strict);
        for (request, paths) in requests {
            builder.set_playlist(&request.name, paths);
            builder.set_description(&request.name, request.description.as_str());
        }
        let output = builder.build()?;

        let summary = ExportSummary {
            library_tracks: index.track_count(),
            skipped_tracks: index.skipped_count(),
            exported_tracks: output.tracks.len(),
            playlists: output.playlists.len(),
        };

        // Step 4: Write the document
        serialize(
            output.into_document(),
            &self.config.output_path,
            self.config.format,
        )?;

        log::info!(
            "Wrote {} playlist(s) with {} track(s)",
            summary.playlists,
            summary.exported_tracks
        );
        Ok(summary)
    }
}
