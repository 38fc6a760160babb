//! Klei Texture CLI
//!
//! Command-line interface for inspecting, converting and slicing KTEX
//! textures.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use klei_tex::{
    AtlasRect, DecodeListener, DecodedImage, OpenOptions, TexTool, TextureExporter, TextureInfo,
    open_path,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ktex")]
#[command(about = "Decode Klei KTEX textures and their atlases")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show texture metadata and atlas rectangles
    Info {
        /// Input texture path
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Skip the atlas document lookup
        #[arg(long)]
        no_atlas: bool,
    },

    /// Decode a texture to an image file
    Convert {
        /// Input texture path
        input: PathBuf,

        /// Output image path (defaults to the input with a .png extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Write every atlas element to its own image
    Extract {
        /// Input texture path
        input: PathBuf,

        /// Output directory (defaults to a directory named after the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Atlas document extension
        #[arg(long, default_value = klei_tex::DEFAULT_ATLAS_EXTENSION)]
        atlas_extension: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info {
            input,
            format,
            no_atlas,
        } => info_command(&input, format, no_atlas),
        Commands::Convert {
            input,
            output,
            no_progress,
        } => convert_command(&input, output, no_progress),
        Commands::Extract {
            input,
            output,
            atlas_extension,
        } => extract_command(&input, output, atlas_extension),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn info_command(input: &Path, format: OutputFormat, no_atlas: bool) -> Result<()> {
    let options = OpenOptions::new().with_load_atlas(!no_atlas);
    let output = open_path(input, &options, &mut ())
        .with_context(|| format!("Failed to open {}", input.display()))?;

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "info": output.info,
                "rects": output.rects,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            print_info(&output.info);
            if !output.rects.is_empty() {
                println!("  Atlas elements: {}", output.rects.len());
                for rect in &output.rects {
                    println!(
                        "    {}: left {:.1}, right {:.1}, top {:.1}, bottom {:.1} ({:.0}x{:.0})",
                        rect.name,
                        rect.left,
                        rect.right,
                        rect.top,
                        rect.bottom,
                        rect.width(),
                        rect.height()
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_info(info: &TextureInfo) {
    println!("{}", info.file_name);
    println!("  Platform: {}", info.platform);
    println!("  Format: {}", info.format);
    println!("  Type: {}", info.texture_type);
    println!("  Mipmaps: {}", info.mip_count);
    println!("  Size: {}", info.size);
    if info.legacy {
        println!("  Legacy header: yes");
    }
}

/// Drives a progress bar from decode notifications
struct ProgressListener {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl ProgressListener {
    fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }
}

impl DecodeListener for ProgressListener {
    fn on_opened(&mut self, info: &TextureInfo) {
        if !self.enabled {
            return;
        }
        let bar = ProgressBar::new(100);
        match ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}%")
        {
            Ok(style) => bar.set_style(style.progress_chars("#>-")),
            Err(e) => debug!("Progress template rejected: {}", e),
        }
        bar.set_message(format!("{} {}", info.file_name, info.size));
        self.bar = Some(bar);
    }

    fn on_progress(&mut self, percent: u8) {
        if let Some(bar) = &self.bar {
            bar.set_position(u64::from(percent));
        }
    }

    fn on_decoded(&mut self, _image: &DecodedImage, _rects: &[AtlasRect]) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

fn convert_command(input: &Path, output: Option<PathBuf>, no_progress: bool) -> Result<()> {
    let output = output.unwrap_or_else(|| input.with_extension("png"));

    let mut tool = TexTool::new(OpenOptions::new().with_load_atlas(false));
    let mut listener = ProgressListener::new(!no_progress);
    let current = tool
        .open_file(input, &mut listener)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    let size = current.output.info.size.clone();

    tool.save_to_path(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("✓ {} ({}) -> {}", input.display(), size, output.display());
    Ok(())
}

fn extract_command(input: &Path, output: Option<PathBuf>, atlas_extension: String) -> Result<()> {
    let output = output.unwrap_or_else(|| input.with_extension(""));
    let options = OpenOptions::new().with_atlas_extension(atlas_extension);
    let decoded = open_path(input, &options, &mut ())
        .with_context(|| format!("Failed to open {}", input.display()))?;

    if decoded.rects.is_empty() {
        bail!(
            "No atlas elements found for {} (expected {})",
            input.display(),
            klei_tex::atlas_path_for(input, &options.atlas_extension).display()
        );
    }

    fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let (width, height) = decoded.image.dimensions();
    let mut used = HashSet::new();
    let mut written = 0usize;

    for rect in &decoded.rects {
        let Some(bounds) = rect.pixel_bounds(width, height) else {
            warn!(name = %rect.name, "Atlas element lies outside the image");
            continue;
        };
        let Some(sub) = decoded
            .image
            .crop(bounds.x, bounds.y, bounds.width, bounds.height)
        else {
            warn!(name = %rect.name, "Atlas element could not be cropped");
            continue;
        };

        let path = output.join(unique_file_name(&rect.name, &mut used));
        TextureExporter::export_png(&sub, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("  Extracted: {}", path.display());
        written += 1;
    }

    println!("✓ Extracted {} of {} elements", written, decoded.rects.len());
    Ok(())
}

/// PNG file name for an element, suffixed when the name was already used
fn unique_file_name(name: &str, used: &mut HashSet<String>) -> String {
    let stem = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "element".to_string());

    let mut candidate = format!("{}.png", stem);
    let mut counter = 1;
    while !used.insert(candidate.clone()) {
        candidate = format!("{}_{}.png", stem, counter);
        counter += 1;
    }
    candidate
}
