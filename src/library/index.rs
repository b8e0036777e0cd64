//! Library document parsing and path index

use super::location::{parse_location, Location};
use super::report::{SkipReporter, SkippedTrack};
use crate::error::{PlaylistError, Result};
use plist::{Dictionary, Value};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Top-level key holding the track records
pub const TRACKS_KEY: &str = "Tracks";

/// Top-level key holding the playlist list
pub const PLAYLISTS_KEY: &str = "Playlists";

pub(crate) const TRACK_ID_KEY: &str = "Track ID";
const LOCATION_KEY: &str = "Location";

/// A local-file track from the library
#[derive(Debug, Clone)]
pub struct IndexedTrack {
    /// Decoded absolute path of the audio file
    pub path: PathBuf,

    /// Numeric `Track ID` of the record
    pub track_id: i64,

    /// The original record, untouched
    pub record: Dictionary,
}

/// Parsed library: the document minus tracks/playlists, plus a path index.
///
/// Each decoded path maps to at most one track. When two records decode to
/// the same path, the first one in document order is kept.
#[derive(Debug, Clone)]
pub struct LibraryIndex {
    base: Dictionary,
    tracks: Vec<IndexedTrack>,
    by_path: HashMap<PathBuf, usize>,
    skipped: usize,
}

impl LibraryIndex {
    /// Read and index a library file (XML or binary plist)
    pub fn open(path: &Path, reporter: &mut dyn SkipReporter) -> Result<Self> {
        log::info!("Parsing Apple Music library from {:?}", path);
        let document = std::fs::read(path).map_err(|e| PlaylistError::io(path, e))?;
        Self::parse(&document, reporter)
    }

    /// Index a serialized library document
    pub fn parse(document: &[u8], reporter: &mut dyn SkipReporter) -> Result<Self> {
        let value = Value::from_reader(Cursor::new(document))?;
        Self::from_value(value, reporter)
    }

    /// Index an already decoded library document
    pub fn from_value(value: Value, reporter: &mut dyn SkipReporter) -> Result<Self> {
        let root = value
            .into_dictionary()
            .ok_or_else(|| PlaylistError::schema("document root is not a dictionary"))?;

        let mut base = Dictionary::new();
        let mut tracks_value = None;
        for (key, value) in root {
            match key.as_str() {
                TRACKS_KEY => tracks_value = Some(value),
                PLAYLISTS_KEY => {}
                _ => {
                    base.insert(key, value);
                }
            }
        }

        let tracks_dict = tracks_value
            .ok_or_else(|| PlaylistError::schema(format!("missing '{}' dictionary", TRACKS_KEY)))?
            .into_dictionary()
            .ok_or_else(|| PlaylistError::schema(format!("'{}' is not a dictionary", TRACKS_KEY)))?;

        let mut index = LibraryIndex {
            base,
            tracks: Vec::with_capacity(tracks_dict.len()),
            by_path: HashMap::with_capacity(tracks_dict.len()),
            skipped: 0,
        };

        for (key, value) in tracks_dict {
            let record = value.into_dictionary().ok_or_else(|| {
                PlaylistError::schema(format!("track {} is not a dictionary", key))
            })?;
            index.insert(key, record, reporter)?;
        }

        log::info!(
            "Indexed {} local tracks ({} skipped)",
            index.tracks.len(),
            index.skipped
        );
        Ok(index)
    }

    fn insert(
        &mut self,
        key: String,
        record: Dictionary,
        reporter: &mut dyn SkipReporter,
    ) -> Result<()> {
        let track_id = record
            .get(TRACK_ID_KEY)
            .and_then(Value::as_signed_integer)
            .ok_or_else(|| {
                PlaylistError::schema(format!("track {} has no integer '{}'", key, TRACK_ID_KEY))
            })?;
        let location = record
            .get(LOCATION_KEY)
            .and_then(Value::as_string)
            .ok_or_else(|| {
                PlaylistError::schema(format!("track {} has no string '{}'", key, LOCATION_KEY))
            })?;

        let path = match parse_location(location) {
            Location::Local(path) => path,
            Location::Remote { scheme } => {
                self.skipped += 1;
                let location = location.to_string();
                reporter.skipped(SkippedTrack {
                    track_key: key,
                    location,
                    scheme,
                });
                return Ok(());
            }
        };

        if let Some(&existing) = self.by_path.get(&path) {
            log::debug!(
                "Track id={} shares location {:?} with track id={}, keeping the first",
                track_id,
                path,
                self.tracks[existing].track_id
            );
            return Ok(());
        }

        self.by_path.insert(path.clone(), self.tracks.len());
        self.tracks.push(IndexedTrack {
            path,
            track_id,
            record,
        });
        Ok(())
    }

    /// Library document without its `Tracks` and `Playlists` entries
    pub fn base(&self) -> &Dictionary {
        &self.base
    }

    /// Indexed tracks in document order
    pub fn tracks(&self) -> impl Iterator<Item = &IndexedTrack> {
        self.tracks.iter()
    }

    /// Look up the track stored at an absolute path
    pub fn get(&self, path: &Path) -> Option<&IndexedTrack> {
        self.by_path.get(path).map(|&i| &self.tracks[i])
    }

    /// Number of indexed local tracks
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Number of tracks left out because they are not local files
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::SilentReporter;

    fn track(id: i64, location: &str) -> Value {
        let mut dict = Dictionary::new();
        dict.insert(TRACK_ID_KEY.to_string(), Value::from(id));
        dict.insert("Name".to_string(), Value::from(format!("Song {}", id)));
        dict.insert(LOCATION_KEY.to_string(), Value::from(location));
        Value::Dictionary(dict)
    }

    fn library(tracks: &[(i64, &str)]) -> Value {
        let mut track_dict = Dictionary::new();
        for (id, location) in tracks {
            track_dict.insert(id.to_string(), track(*id, location));
        }

        let mut root = Dictionary::new();
        root.insert("Major Version".to_string(), Value::from(1i64));
        root.insert(TRACKS_KEY.to_string(), Value::Dictionary(track_dict));
        root.insert(PLAYLISTS_KEY.to_string(), Value::Array(Vec::new()));
        root.insert(
            "Music Folder".to_string(),
            Value::from("file:///Users/me/Music/"),
        );
        Value::Dictionary(root)
    }

    #[test]
    fn test_base_strips_tracks_and_playlists() {
        let index = LibraryIndex::from_value(
            library(&[(1, "file:///Music/a.mp3")]),
            &mut SilentReporter,
        )
        .unwrap();

        let keys: Vec<&str> = index.base().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Major Version", "Music Folder"]);
    }

    #[test]
    fn test_remote_tracks_skipped_and_reported() {
        let mut skipped = Vec::new();
        let index = LibraryIndex::from_value(
            library(&[
                (1, "file:///Music/a.mp3"),
                (3, "https://stream.example.com/3"),
            ]),
            &mut skipped,
        )
        .unwrap();

        assert_eq!(index.track_count(), 1);
        assert_eq!(index.skipped_count(), 1);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].track_key, "3");
        assert_eq!(skipped[0].location, "https://stream.example.com/3");
        assert_eq!(skipped[0].scheme, "https");
    }

    #[test]
    fn test_percent_encoded_location_indexed_decoded() {
        let index = LibraryIndex::from_value(
            library(&[(7, "file:///Music/A%20B.mp3")]),
            &mut SilentReporter,
        )
        .unwrap();

        let found = index.get(Path::new("/Music/A B.mp3")).unwrap();
        assert_eq!(found.track_id, 7);
        assert!(index.get(Path::new("/Music/A%20B.mp3")).is_none());
    }

    #[test]
    fn test_duplicate_location_first_wins() {
        let index = LibraryIndex::from_value(
            library(&[(1, "file:///Music/a.mp3"), (2, "file:///Music/a.mp3")]),
            &mut SilentReporter,
        )
        .unwrap();

        assert_eq!(index.track_count(), 1);
        assert_eq!(index.get(Path::new("/Music/a.mp3")).unwrap().track_id, 1);
    }

    #[test]
    fn test_document_order_preserved() {
        let index = LibraryIndex::from_value(
            library(&[
                (20, "file:///Music/z.mp3"),
                (10, "file:///Music/a.mp3"),
                (30, "file:///Music/m.mp3"),
            ]),
            &mut SilentReporter,
        )
        .unwrap();

        let ids: Vec<i64> = index.tracks().map(|t| t.track_id).collect();
        assert_eq!(ids, vec![20, 10, 30]);
    }

    #[test]
    fn test_missing_tracks_is_schema_error() {
        let mut root = Dictionary::new();
        root.insert(PLAYLISTS_KEY.to_string(), Value::Array(Vec::new()));

        let err = LibraryIndex::from_value(Value::Dictionary(root), &mut SilentReporter)
            .unwrap_err();
        assert!(matches!(err, PlaylistError::Schema(_)));
    }

    #[test]
    fn test_track_without_location_is_schema_error() {
        let mut record = Dictionary::new();
        record.insert(TRACK_ID_KEY.to_string(), Value::from(5i64));
        let mut tracks = Dictionary::new();
        tracks.insert("5".to_string(), Value::Dictionary(record));
        let mut root = Dictionary::new();
        root.insert(TRACKS_KEY.to_string(), Value::Dictionary(tracks));

        let err = LibraryIndex::from_value(Value::Dictionary(root), &mut SilentReporter)
            .unwrap_err();
        assert!(matches!(err, PlaylistError::Schema(_)));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = LibraryIndex::parse(b"<plist><dict><key>Tracks", &mut SilentReporter)
            .unwrap_err();
        assert!(matches!(err, PlaylistError::Parse(_)));
    }

    #[test]
    fn test_parse_xml_document() {
        let mut xml = Vec::new();
        library(&[(1, "file:///Music/a.mp3")])
            .to_writer_xml(&mut xml)
            .unwrap();

        let index = LibraryIndex::parse(&xml, &mut SilentReporter).unwrap();
        assert_eq!(index.track_count(), 1);
        assert_eq!(
            index.get(Path::new("/Music/a.mp3")).unwrap().record.get("Name"),
            Some(&Value::from("Song 1"))
        );
    }
}
