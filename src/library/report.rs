//! Reporting of tracks left out of the index

/// A library track that was not indexed because it has no local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTrack {
    /// Key of the entry in the library's `Tracks` dictionary
    pub track_key: String,

    /// The raw `Location` value
    pub location: String,

    /// URI scheme of the location, empty when it is not a URI
    pub scheme: String,
}

/// Receives skipped-track notices while a library is indexed
pub trait SkipReporter {
    fn skipped(&mut self, track: SkippedTrack);
}

/// Emits a warning through the `log` facade for every skipped track
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl SkipReporter for LogReporter {
    fn skipped(&mut self, track: SkippedTrack) {
        let scheme = if track.scheme.is_empty() {
            "no scheme"
        } else {
            track.scheme.as_str()
        };
        log::warn!(
            "Skipped track id={} since it's not a local file ({}: {})",
            track.track_key,
            scheme,
            track.location
        );
    }
}

/// Drops all notices (`--no-warnings`)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl SkipReporter for SilentReporter {
    fn skipped(&mut self, _track: SkippedTrack) {}
}

impl SkipReporter for Vec<SkippedTrack> {
    fn skipped(&mut self, track: SkippedTrack) {
        self.push(track);
    }
}
