//! Round-trip check of a written playlist document

use crate::error::{PlaylistError, Result};
use crate::playlist::{read_back, PlaylistDescriptor};
use plist::Value;
use std::path::Path;

/// Re-read a generated document and check that every playlist item
/// references a track present in its `Tracks` dictionary.
///
/// Returns the playlists found in the document.
pub fn validate_output(path: &Path) -> Result<Vec<PlaylistDescriptor>> {
    log::info!("Validating output at: {:?}", path);

    let document = Value::from_file(path)?
        .into_dictionary()
        .ok_or_else(|| PlaylistError::schema("output root is not a dictionary"))?;
    let (track_keys, playlists) = read_back(&document)
        .ok_or_else(|| PlaylistError::schema("output has malformed Tracks/Playlists"))?;

    for playlist in &playlists {
        if let Some(id) = playlist
            .track_ids
            .iter()
            .find(|id| !track_keys.contains(&id.to_string()))
        {
            return Err(PlaylistError::schema(format!(
                "playlist '{}' references missing track {}",
                playlist.name, id
            )));
        }
        log::debug!("  Playlist '{}': {} item(s)", playlist.name, playlist.len());
    }

    log::info!(
        "Output OK: {} track(s), {} playlist(s)",
        track_keys.len(),
        playlists.len()
    );
    Ok(playlists)
}
