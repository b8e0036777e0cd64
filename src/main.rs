use anyhow::{Context, Result};
use applemusic_playlist::export::validate_output;
use applemusic_playlist::paths::PathSource;
use applemusic_playlist::{ExportConfig, ExportPipeline, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "applemusic-playlist")]
#[command(
    about = "Make playlist XML from files to be imported to Apple Music app",
    long_about = None
)]
struct Args {
    /// Common base directory for music files given as relative paths
    /// (defaults to the current working directory)
    #[arg(short = 'b', long)]
    basedir: Option<PathBuf>,

    /// Name of the playlist
    #[arg(short = 'n', long, default_value = "playlist")]
    name: String,

    /// Read music files from FILE_LIST (one per line) instead of the
    /// command line; `-` means stdin
    #[arg(short = 'T', long = "files-from", value_name = "FILE_LIST")]
    files_from: Option<String>,

    /// Playlist description
    #[arg(short = 'D', long, default_value = "")]
    description: String,

    /// Suppress warnings about Internet tracks, which cannot be matched
    #[arg(short = 'W', long)]
    no_warnings: bool,

    /// Fail if a music file is not found in the library
    #[arg(long)]
    strict: bool,

    /// Write a binary plist instead of XML
    #[arg(long)]
    binary: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Library XML file exported from Apple Music app
    library_xml: String,

    /// Path of the XML to write
    output_xml: String,

    /// Music files to include; ignored when `-T` (`--files-from`) is given
    #[arg(value_name = "MUSIC_FILE")]
    files_to_include: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let base_dir = match args.basedir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine working directory")?,
    };

    // Expand ~ in paths
    let library_path = PathBuf::from(shellexpand::tilde(&args.library_xml).as_ref());
    let output_path = PathBuf::from(shellexpand::tilde(&args.output_xml).as_ref());

    let source = PathSource::from_args(args.files_from.as_deref(), args.files_to_include);
    let format = if args.binary {
        OutputFormat::Binary
    } else {
        OutputFormat::Xml
    };

    let config = ExportConfig::new(library_path, output_path.clone(), base_dir)
        .with_playlist(args.name, args.description, source)
        .with_warnings(!args.no_warnings)
        .with_strict(args.strict)
        .with_format(format);

    let summary = ExportPipeline::new(config)
        .export()
        .context("Failed to generate playlist")?;
    log::debug!("{:?}", summary);

    validate_output(&output_path).context("Generated playlist failed validation")?;
    log::info!("Playlist ready at: {:?}", output_path);

    Ok(())
}
