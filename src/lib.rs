//! Apple Music playlist maker
//!
//! This library turns a list of local music files into a playlist document
//! that Apple Music can import, using the app's exported library XML to
//! map file paths to track records.

pub mod error;
pub mod export;
pub mod library;
pub mod paths;
pub mod playlist;

pub use error::PlaylistError;
pub use export::config::{ExportConfig, OutputFormat};
pub use export::pipeline::ExportPipeline;
