//! Output document assembly and export orchestration

pub mod assembler;
pub mod config;
pub mod pipeline;
pub mod validation;

pub use assembler::{assemble, serialize};
pub use config::{ExportConfig, OutputFormat, PlaylistRequest};
pub use pipeline::{ExportPipeline, ExportSummary};
pub use validation::validate_output;
