//! Matching requested paths against the library index

use super::descriptor::PlaylistDescriptor;
use crate::error::{PlaylistError, Result};
use crate::export::assemble;
use crate::library::LibraryIndex;
use crate::paths::resolve_absolute;
use plist::Dictionary;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// A named playlist waiting to be built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSpec {
    pub name: String,
    pub description: String,

    /// Requested paths, as given (possibly relative)
    pub paths: Vec<String>,
}

/// Track records shared by all built playlists, keyed by stringified Track ID.
///
/// A track requested by several playlists is stored once.
#[derive(Debug, Clone, Default)]
pub struct TrackMapping<'a> {
    entries: Vec<(String, &'a Dictionary)>,
    positions: HashMap<i64, usize>,
}

impl<'a> TrackMapping<'a> {
    fn insert(&mut self, track_id: i64, record: &'a Dictionary) {
        if self.positions.contains_key(&track_id) {
            return;
        }
        self.positions.insert(track_id, self.entries.len());
        self.entries.push((track_id.to_string(), record));
    }

    /// Record for a Track ID, if any playlist selected it
    pub fn get(&self, track_id: i64) -> Option<&'a Dictionary> {
        self.positions.get(&track_id).map(|&i| self.entries[i].1)
    }

    /// Entries in first-selection order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'a Dictionary)> + '_ {
        self.entries.iter().map(|(key, record)| (key.as_str(), *record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of [`PlaylistBuilder::build`]
#[derive(Debug, Clone)]
pub struct BuildOutput<'a> {
    /// The library the playlists were built against
    pub index: &'a LibraryIndex,

    /// Every track referenced by at least one playlist
    pub tracks: TrackMapping<'a>,

    /// One descriptor per registered playlist, in registration order
    pub playlists: Vec<PlaylistDescriptor>,
}

impl BuildOutput<'_> {
    /// Merge the built tracks and playlists into the library base document
    pub fn into_document(self) -> Dictionary {
        assemble(self.index.base(), &self.tracks, &self.playlists)
    }
}

/// Collects named path lists and turns them into playlists
pub struct PlaylistBuilder<'a> {
    index: &'a LibraryIndex,
    base_dir: PathBuf,
    playlists: Vec<PlaylistSpec>,
    strict: bool,
}

impl<'a> PlaylistBuilder<'a> {
    /// Create a builder over `index`; relative paths resolve against `base_dir`
    pub fn new(index: &'a LibraryIndex, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            index,
            base_dir: base_dir.into(),
            playlists: Vec::new(),
            strict: false,
        }
    }

    /// Fail the build when a requested path has no track in the library
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Register (or replace) the path list for playlist `name`.
    ///
    /// Replacing keeps the playlist's position and description.
    pub fn set_playlist<I, S>(&mut self, name: &str, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        match self.find_mut(name) {
            Some(spec) => spec.paths = paths,
            None => self.playlists.push(PlaylistSpec {
                name: name.to_string(),
                description: String::new(),
                paths,
            }),
        }
    }

    /// Set the description of playlist `name`, registering it empty if needed
    pub fn set_description(&mut self, name: &str, description: impl Into<String>) {
        let description = description.into();
        match self.find_mut(name) {
            Some(spec) => spec.description = description,
            None => self.playlists.push(PlaylistSpec {
                name: name.to_string(),
                description,
                paths: Vec::new(),
            }),
        }
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut PlaylistSpec> {
        self.playlists.iter_mut().find(|spec| spec.name == name)
    }

    /// Build every registered playlist.
    ///
    /// Tracks appear in library order, not request order. Requested paths
    /// with no library track are left out, or rejected in strict mode.
    pub fn build(self) -> Result<BuildOutput<'a>> {
        let mut tracks = TrackMapping::default();
        let mut descriptors = Vec::with_capacity(self.playlists.len());

        for spec in &self.playlists {
            let wanted: HashSet<PathBuf> = spec
                .paths
                .iter()
                .map(|p| resolve_absolute(&self.base_dir, p))
                .collect();

            let mut descriptor = PlaylistDescriptor::new(&spec.name, &spec.description);
            for track in self.index.tracks().filter(|t| wanted.contains(&t.path)) {
                descriptor.track_ids.push(track.track_id);
                tracks.insert(track.track_id, &track.record);
            }

            let unmatched = self.unmatched(&wanted);
            if !unmatched.is_empty() {
                for path in &unmatched {
                    log::debug!("No library track for {:?}", path);
                }
                if self.strict {
                    return Err(PlaylistError::Unmatched {
                        playlist: spec.name.clone(),
                        paths: unmatched,
                    });
                }
            }

            log::info!(
                "Playlist '{}': {} of {} requested file(s) found in library",
                spec.name,
                descriptor.len(),
                wanted.len()
            );
            descriptors.push(descriptor);
        }

        Ok(BuildOutput {
            index: self.index,
            tracks,
            playlists: descriptors,
        })
    }

    fn unmatched(&self, wanted: &HashSet<PathBuf>) -> Vec<PathBuf> {
        let mut missing: Vec<PathBuf> = wanted
            .iter()
            .filter(|p| self.index.get(p).is_none())
            .cloned()
            .collect();
        missing.sort();
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::SilentReporter;
    use plist::Value;

    fn index(tracks: &[(i64, &str)]) -> LibraryIndex {
        let mut track_dict = Dictionary::new();
        for (id, location) in tracks {
            let mut record = Dictionary::new();
            record.insert("Track ID".to_string(), Value::from(*id));
            record.insert("Location".to_string(), Value::from(*location));
            track_dict.insert(id.to_string(), Value::Dictionary(record));
        }
        let mut root = Dictionary::new();
        root.insert("Tracks".to_string(), Value::Dictionary(track_dict));
        root.insert("Playlists".to_string(), Value::Array(Vec::new()));
        LibraryIndex::from_value(Value::Dictionary(root), &mut SilentReporter).unwrap()
    }

    fn sample_index() -> LibraryIndex {
        index(&[
            (1, "file:///Music/a.mp3"),
            (2, "file:///Music/b.mp3"),
            (3, "https://example.com/c.mp3"),
        ])
    }

    #[test]
    fn test_only_matching_tracks_selected() {
        let index = sample_index();
        let mut builder = PlaylistBuilder::new(&index, "/");
        builder.set_playlist("Test", ["/Music/a.mp3", "/Music/c.mp3"]);

        let output = builder.build().unwrap();
        assert_eq!(output.playlists.len(), 1);
        assert_eq!(output.playlists[0].track_ids, vec![1]);
        assert_eq!(output.tracks.len(), 1);
        assert!(output.tracks.get(1).is_some());
        assert!(output.tracks.get(2).is_none());
        assert!(output.tracks.get(3).is_none());
    }

    #[test]
    fn test_relative_paths_use_base_dir() {
        let index = sample_index();
        let mut builder = PlaylistBuilder::new(&index, "/Music");
        builder.set_playlist("Rel", ["b.mp3"]);

        let output = builder.build().unwrap();
        assert_eq!(output.playlists[0].track_ids, vec![2]);
    }

    #[test]
    fn test_library_order_not_request_order() {
        let index = sample_index();
        let mut builder = PlaylistBuilder::new(&index, "/");
        builder.set_playlist("Order", ["/Music/b.mp3", "/Music/a.mp3"]);

        let output = builder.build().unwrap();
        assert_eq!(output.playlists[0].track_ids, vec![1, 2]);
    }

    #[test]
    fn test_empty_playlist_still_emitted() {
        let index = sample_index();
        let mut builder = PlaylistBuilder::new(&index, "/");
        builder.set_playlist("Empty", Vec::<String>::new());

        let output = builder.build().unwrap();
        assert_eq!(output.playlists.len(), 1);
        assert!(output.playlists[0].is_empty());
        assert!(output.tracks.is_empty());
    }

    #[test]
    fn test_shared_track_stored_once() {
        let index = sample_index();
        let mut builder = PlaylistBuilder::new(&index, "/");
        builder.set_playlist("First", ["/Music/a.mp3"]);
        builder.set_playlist("Second", ["/Music/a.mp3", "/Music/b.mp3"]);

        let output = builder.build().unwrap();
        assert_eq!(output.tracks.len(), 2);
        assert_eq!(output.playlists[0].track_ids, vec![1]);
        assert_eq!(output.playlists[1].track_ids, vec![1, 2]);
        let keys: Vec<&str> = output.tracks.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["1", "2"]);
    }

    #[test]
    fn test_set_playlist_overwrites_in_place() {
        let index = sample_index();
        let mut builder = PlaylistBuilder::new(&index, "/");
        builder.set_playlist("One", ["/Music/a.mp3"]);
        builder.set_description("One", "kept");
        builder.set_playlist("Two", ["/Music/a.mp3"]);
        builder.set_playlist("One", ["/Music/b.mp3"]);

        let output = builder.build().unwrap();
        let names: Vec<&str> = output.playlists.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Two"]);
        assert_eq!(output.playlists[0].description, "kept");
        assert_eq!(output.playlists[0].track_ids, vec![2]);
    }

    #[test]
    fn test_strict_mode_rejects_unmatched() {
        let index = sample_index();
        let mut builder = PlaylistBuilder::new(&index, "/").with_strict(true);
        builder.set_playlist("Strict", ["/Music/a.mp3", "/Music/missing.mp3"]);

        match builder.build() {
            Err(PlaylistError::Unmatched { playlist, paths }) => {
                assert_eq!(playlist, "Strict");
                assert_eq!(paths, vec![PathBuf::from("/Music/missing.mp3")]);
            }
            other => panic!("expected Unmatched error, got {:?}", other.map(|o| o.playlists)),
        }
    }

    #[test]
    fn test_strict_mode_accepts_full_match() {
        let index = sample_index();
        let mut builder = PlaylistBuilder::new(&index, "/").with_strict(true);
        builder.set_playlist("Strict", ["/Music/a.mp3", "/Music/b.mp3"]);

        assert_eq!(builder.build().unwrap().playlists[0].len(), 2);
    }
}
