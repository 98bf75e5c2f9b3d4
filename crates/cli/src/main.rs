#![deny(unsafe_code)]
//! CLI binary for the particle backdrop.
//!
//! Subcommands:
//! - `render`: replay a scene headlessly and write a PNG of the last frame
//! - `grid`: show the grid a viewport would get
//! - `params`: print default parameters and their schema

mod error;

use backdrop_core::{FieldConfig, GridLayout, PointerSample, Scene, Srgb, Viewport};
use backdrop_raster::snapshot::write_png;
use clap::{Parser, Subcommand};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "backdrop", about = "Interactive particle field backdrop")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the field for N frames and write a PNG of the last one.
    Render {
        /// Viewport width in pixels.
        #[arg(short = 'W', long, default_value_t = 800)]
        width: u32,

        /// Viewport height in pixels.
        #[arg(short = 'H', long, default_value_t = 600)]
        height: u32,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 120)]
        ticks: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Pointer position "X,Y" held from the first frame on.
        #[arg(long)]
        pointer: Option<String>,

        /// Field parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Scene JSON file; replaces the size, tick, seed, pointer and
        /// params flags.
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Opaque background color (hex). Transparent when omitted.
        #[arg(long)]
        background: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "backdrop.png")]
        output: PathBuf,
    },
    /// Show spacing, columns, rows and point count for a viewport.
    Grid {
        #[arg(short = 'W', long, default_value_t = 800)]
        width: u32,

        #[arg(short = 'H', long, default_value_t = 600)]
        height: u32,

        /// Field parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Print default parameter values and the parameter schema.
    Params,
}

fn parse_params(raw: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(raw).map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
}

fn parse_pointer(raw: &str) -> Result<(f64, f64), CliError> {
    let bad = || CliError::Input(format!("invalid --pointer '{raw}': expected X,Y"));
    let (x, y) = raw.split_once(',').ok_or_else(bad)?;
    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    if !(x.is_finite() && y.is_finite()) {
        return Err(bad());
    }
    Ok((x, y))
}

fn load_scene(path: &Path) -> Result<Scene, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid scene {}: {e}", path.display())))
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let defaults = FieldConfig::default().params();
            if cli.json {
                print_json(&serde_json::json!({
                    "defaults": defaults,
                    "schema": FieldConfig::param_schema(),
                }))?;
            } else if let Some(map) = defaults.as_object() {
                for (name, value) in map {
                    println!("  {name:<20} {value}");
                }
            }
        }
        Command::Grid {
            width,
            height,
            params,
        } => {
            let config = FieldConfig::from_json(&parse_params(&params)?)?;
            let layout = GridLayout::for_viewport(Viewport::new(width, height), &config.grid);
            if cli.json {
                print_json(&serde_json::json!({
                    "width": width,
                    "height": height,
                    "spacing": layout.spacing,
                    "columns": layout.columns,
                    "rows": layout.rows,
                    "points": layout.len(),
                }))?;
            } else {
                println!(
                    "{width}x{height}: spacing {}, {} columns x {} rows = {} points",
                    layout.spacing,
                    layout.columns,
                    layout.rows,
                    layout.len()
                );
            }
        }
        Command::Render {
            width,
            height,
            ticks,
            seed,
            pointer,
            params,
            scene,
            background,
            output,
        } => {
            let scene = match scene {
                Some(path) => load_scene(&path)?,
                None => {
                    let mut s = Scene::new(width, height, seed);
                    s.ticks = ticks;
                    s.params = parse_params(&params)?;
                    if let Some(raw) = pointer {
                        let (x, y) = parse_pointer(&raw)?;
                        s.pointer.push(PointerSample { tick: 0, x, y });
                    }
                    s
                }
            };
            let background = background.as_deref().map(Srgb::from_hex).transpose()?;

            let raster = backdrop_raster::replay(&scene)?;
            write_png(&raster, background, &output)?;
            info!(output = %output.display(), "snapshot written");

            if cli.json {
                print_json(&serde_json::json!({
                    "width": scene.width,
                    "height": scene.height,
                    "ticks": scene.ticks,
                    "seed": scene.seed,
                    "output": output.display().to_string(),
                }))?;
            } else {
                eprintln!(
                    "rendered {}x{} ({} ticks, seed {}) -> {}",
                    scene.width,
                    scene.height,
                    scene.ticks,
                    scene.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
