//! Playlist construction from requested file paths

mod builder;
mod descriptor;

pub use builder::{BuildOutput, PlaylistBuilder, PlaylistSpec, TrackMapping};
pub use descriptor::{read_back, PlaylistDescriptor};
