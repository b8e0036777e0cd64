//! Output document assembly and writing

use super::config::OutputFormat;
use crate::error::{PlaylistError, Result};
use crate::library::{PLAYLISTS_KEY, TRACKS_KEY};
use crate::playlist::{PlaylistDescriptor, TrackMapping};
use plist::{Dictionary, Value};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Put the built tracks and playlists into a copy of the base document
pub fn assemble(
    base: &Dictionary,
    tracks: &TrackMapping<'_>,
    playlists: &[PlaylistDescriptor],
) -> Dictionary {
    let mut track_dict = Dictionary::new();
    for (key, record) in tracks.iter() {
        track_dict.insert(key.to_string(), Value::Dictionary(record.clone()));
    }

    let playlist_list = playlists
        .iter()
        .map(|p| Value::Dictionary(p.to_dictionary()))
        .collect();

    let mut document = base.clone();
    document.insert(TRACKS_KEY.to_string(), Value::Dictionary(track_dict));
    document.insert(PLAYLISTS_KEY.to_string(), Value::Array(playlist_list));
    document
}

/// Write `document` to `output_path`, replacing any existing file.
///
/// The document is staged in a temporary file next to `output_path` and
/// renamed into place only once fully written, so a failed write leaves any
/// previous file untouched.
pub fn serialize(document: Dictionary, output_path: &Path, format: OutputFormat) -> Result<()> {
    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(|e| PlaylistError::io(output_path, e))?;

    write_document(
        &Value::Dictionary(document),
        staged.as_file_mut(),
        format,
        output_path,
    )?;

    staged
        .persist(output_path)
        .map_err(|e| PlaylistError::io(output_path, e.error))?;

    log::debug!("Wrote {:?} plist to {:?}", format, output_path);
    Ok(())
}

/// Encode `value` into `writer`. Failures of the underlying writer are
/// reported as I/O errors against `path`, not as encoding errors.
fn write_document<W: Write>(
    value: &Value,
    writer: W,
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    let written = match format {
        OutputFormat::Xml => value.to_writer_xml(&mut writer),
        OutputFormat::Binary => value.to_writer_binary(&mut writer),
    };
    written.map_err(|source| match source.into_io() {
        Ok(e) => PlaylistError::io(path, e),
        Err(source) => PlaylistError::Write {
            path: path.to_path_buf(),
            source,
        },
    })?;

    writer.flush().map_err(|e| PlaylistError::io(path, e))
}
