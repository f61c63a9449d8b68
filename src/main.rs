//! Bracketry CLI
//!
//! Usage:
//!   bracketry [OPTIONS] <FILE>
//!
//! Options:
//!   -o, --output <PATH>      Output file or directory (stdout if not provided)
//!   -s, --stylesheet <FILE>  Stylesheet file for color palette (TOML format)
//!   --seed <N>               Seed for the entrant shuffle
//!   --cascade                Auto-advance walkovers created by propagation
//!   -d, --debug              Log build steps and the computed layout
//!   -h, --help               Print help

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, Utc};
use clap::Parser;
use log::{error, info};

use bracketry::logging::init_logger;
use bracketry::{
    output_file_name, render_tournament, LayoutConfig, Manifest, MemoryStore, PropagationPolicy,
    RenderConfig, Stylesheet, RENDER_TOP_MARGIN,
};

#[derive(Parser)]
#[command(name = "bracketry")]
#[command(about = "Single-elimination tournament brackets, rendered as SVG")]
struct Cli {
    /// Tournament file (TOML)
    input: PathBuf,

    /// Output file, or directory to write `<name>.svg` into (stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Seed for the entrant shuffle (overrides the file's seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1920.0)]
    width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 1080.0)]
    height: f64,

    /// Keep advancing walkovers up the bracket after each result
    #[arg(long)]
    cascade: bool,

    /// Debug mode: log build steps and the computed layout
    #[arg(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.debug);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stylesheet = match &cli.stylesheet {
        Some(path) => Stylesheet::from_file(path)
            .map_err(|e| format!("Error loading stylesheet '{}': {}", path.display(), e))?,
        None => Stylesheet::default(),
    };

    let manifest = Manifest::from_file(&cli.input)
        .map_err(|e| format!("Error reading file '{}': {}", cli.input.display(), e))?;

    let policy = if cli.cascade {
        PropagationPolicy::Cascade
    } else {
        PropagationPolicy::SingleLevel
    };

    let mut store = MemoryStore::new();
    let mut rng = manifest.rng(cli.seed);
    let tournament = manifest.apply(&mut store, Utc::now(), &mut rng, policy)?;

    let config = RenderConfig::new()
        .with_layout(
            LayoutConfig::default()
                .with_canvas(cli.width, cli.height)
                .with_top_margin(RENDER_TOP_MARGIN),
        )
        .with_stylesheet(stylesheet)
        .with_debug(cli.debug);
    let svg = render_tournament(&store, tournament.id, &config, Local::now().naive_local())?;

    match &cli.output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(output_file_name(&tournament.name))
            } else {
                path.clone()
            };
            fs::write(&path, svg)?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", svg),
    }
    Ok(())
}
