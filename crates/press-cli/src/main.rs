//! press - print asset preparation CLI
//!
//! Generates gradients, vignettes, QR codes and logos for print layouts and
//! converts images to CMYK, caching every result by content.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "press")]
#[command(author, version, about = "Print asset preparation and CMYK conversion")]
#[command(long_about = "
Prepares print-ready assets. Every output is cached under a digest of the
request, so repeated invocations return the existing file.

Colors are a palette name (see `press palette`) or `c,m,y,k` percentages.

Examples:
  press gradient --width 2480 --height 3508 --top background --bottom accent_muted
  press gradient --width-mm 210 --height-mm 297 --dpi 300
  press vignette photos/hero.png --bottom 0.5 --name hero_faded
  press qr https://example.com/exhibit --size 600
  press cmyk photos/team.png --profile ISOcoated_v2_300_eci.icc
  press logo brand/logo.png --width 800
  press info build/asset_cache/*.jpg
  press --cache-dir /tmp/cache clear
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pipeline configuration (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Cache directory (overrides config)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Keep sources and logos in RGB
    #[arg(long, global = true)]
    no_force_cmyk: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Vertical CMYK gradient
    #[command(visible_alias = "g")]
    Gradient(GradientArgs),

    /// Edge/bottom fade over a source image
    Vignette(VignetteArgs),

    /// QR code in CMYK
    Qr(QrArgs),

    /// Convert an image to CMYK
    Cmyk(CmykArgs),

    /// Resize a logo
    Logo(LogoArgs),

    /// Show image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// List palette colors
    Palette,

    /// Empty the asset cache
    Clear,
}

#[derive(Args)]
struct GradientArgs {
    /// Width in pixels
    #[arg(short = 'W', long, required_unless_present = "width_mm")]
    width: Option<u32>,

    /// Height in pixels
    #[arg(short = 'H', long, required_unless_present = "height_mm")]
    height: Option<u32>,

    /// Width in millimetres (with --dpi)
    #[arg(long, requires = "height_mm")]
    width_mm: Option<f64>,

    /// Height in millimetres (with --dpi)
    #[arg(long, requires = "width_mm")]
    height_mm: Option<f64>,

    /// Resolution for millimetre sizes
    #[arg(long, default_value = "300")]
    dpi: u32,

    /// Top color
    #[arg(long, default_value = "pure_white")]
    top: String,

    /// Bottom color
    #[arg(long, default_value = "rich_black")]
    bottom: String,
}

#[derive(Args)]
struct VignetteArgs {
    /// Source image
    source: PathBuf,

    /// Left/right fade as a fraction of the width
    #[arg(long, default_value = "0.25")]
    edge: f64,

    /// Bottom fade as a fraction of the height
    #[arg(long, default_value = "0.45")]
    bottom: f64,

    /// Top fade as a fraction of the height
    #[arg(long, default_value = "0.05")]
    top: f64,

    /// Cache file name instead of the digest
    #[arg(short, long)]
    name: Option<String>,
}

#[derive(Args)]
struct QrArgs {
    /// Text or URL to encode
    payload: String,

    /// Edge length in pixels
    #[arg(short, long, default_value = "400")]
    size: u32,

    /// Quiet zone in modules
    #[arg(long, default_value = "2")]
    border: u32,

    /// Dark module color
    #[arg(long, default_value = "0,0,0,100")]
    fg: String,

    /// Light module color
    #[arg(long, default_value = "0,0,0,0")]
    bg: String,
}

#[derive(Args)]
struct CmykArgs {
    /// Source image
    source: PathBuf,

    /// ICC output profile
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Cache file name instead of the digest
    #[arg(short, long)]
    name: Option<String>,
}

#[derive(Args)]
struct LogoArgs {
    /// Source logo
    source: PathBuf,

    /// Target width in pixels
    #[arg(short = 'W', long)]
    width: u32,

    /// Composite over white instead of keeping transparency
    #[arg(long)]
    flatten: bool,

    /// Filter: nearest, bilinear, bicubic, lanczos3
    #[arg(short, long, default_value = "lanczos3")]
    filter: String,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let ctx = commands::Session::load(cli.config.as_deref(), cli.cache_dir, cli.no_force_cmyk, cli.verbose)?;

    match cli.command {
        Commands::Gradient(args) => commands::gradient::run(args, &ctx),
        Commands::Vignette(args) => commands::vignette::run(args, &ctx),
        Commands::Qr(args) => commands::qr::run(args, &ctx),
        Commands::Cmyk(args) => commands::cmyk::run(args, &ctx),
        Commands::Logo(args) => commands::logo::run(args, &ctx),
        Commands::Info(args) => commands::info::run(args, &ctx),
        Commands::Palette => commands::palette::run(&ctx),
        Commands::Clear => commands::clear::run(&ctx),
    }
}
