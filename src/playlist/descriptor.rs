use crate::library::{PLAYLISTS_KEY, TRACKS_KEY};
use plist::{Dictionary, Value};

/// One playlist as written to the output document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistDescriptor {
    /// Playlist name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Track IDs in playlist order
    pub track_ids: Vec<i64>,
}

impl PlaylistDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            track_ids: Vec::new(),
        }
    }

    /// Number of tracks in this playlist
    pub fn len(&self) -> usize {
        self.track_ids.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.track_ids.is_empty()
    }

    /// Property-list form of the playlist.
    ///
    /// `Playlist ID` and `Playlist Persistent ID` are placeholders; Apple
    /// Music assigns real values on import.
    pub fn to_dictionary(&self) -> Dictionary {
        let items = self
            .track_ids
            .iter()
            .map(|&id| {
                let mut item = Dictionary::new();
                item.insert("Track ID".to_string(), Value::from(id));
                Value::Dictionary(item)
            })
            .collect();

        let mut dict = Dictionary::new();
        dict.insert("Name".to_string(), Value::from(self.name.as_str()));
        dict.insert(
            "Description".to_string(),
            Value::from(self.description.as_str()),
        );
        dict.insert("Playlist ID".to_string(), Value::from(0i64));
        dict.insert("Playlist Persistent ID".to_string(), Value::from(""));
        dict.insert("All Items".to_string(), Value::Boolean(true));
        dict.insert("Playlist Items".to_string(), Value::Array(items));
        dict
    }

    /// Read a descriptor back from its property-list form
    pub fn from_dictionary(dict: &Dictionary) -> Option<Self> {
        let track_ids = dict
            .get("Playlist Items")?
            .as_array()?
            .iter()
            .map(|item| item.as_dictionary()?.get("Track ID")?.as_signed_integer())
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            name: dict.get("Name")?.as_string()?.to_string(),
            description: dict
                .get("Description")
                .and_then(Value::as_string)
                .unwrap_or_default()
                .to_string(),
            track_ids,
        })
    }
}

/// Pull `Tracks` keys and the playlists out of a generated document
pub fn read_back(document: &Dictionary) -> Option<(Vec<String>, Vec<PlaylistDescriptor>)> {
    let tracks = document
        .get(TRACKS_KEY)?
        .as_dictionary()?
        .keys()
        .cloned()
        .collect();
    let playlists = document
        .get(PLAYLISTS_KEY)?
        .as_array()?
        .iter()
        .map(|p| PlaylistDescriptor::from_dictionary(p.as_dictionary()?))
        .collect::<Option<Vec<_>>>()?;
    Some((tracks, playlists))
}
