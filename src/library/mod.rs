//! Apple Music library parsing
//!
//! Reads the property-list library export, strips its track and playlist
//! sections, and indexes the remaining local-file tracks by their decoded
//! filesystem path.

mod index;
mod location;
mod report;

pub use index::{IndexedTrack, LibraryIndex, PLAYLISTS_KEY, TRACKS_KEY};
pub use location::{parse_location, Location};
pub use report::{LogReporter, SilentReporter, SkipReporter, SkippedTrack};
