//! Headless grid run to JSON trace converter

use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use orca::trace::RunTrace;
use orca::{Engine, Grid};

#[derive(Parser, Debug)]
#[command(name = "orca2json")]
#[command(version = "0.1.0")]
#[command(about = "Run a grid file and emit a JSON trace", long_about = None)]
struct Args {
    /// Input grid file
    input: PathBuf,

    /// Output JSON file (writes to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output compact JSON (default is pretty-printed)
    #[arg(short, long)]
    compact: bool,

    /// Number of frames to evaluate
    #[arg(short, long, default_value_t = 8)]
    frames: usize,

    /// Seed for the random operator
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let grid = Grid::from_path(&args.input)?;
    let mut engine = match args.seed {
        Some(seed) => Engine::with_seed(grid, seed),
        None => Engine::new(grid),
    };

    let trace = RunTrace::capture(&mut engine, args.frames);

    let json_string = if args.compact {
        serde_json::to_string(&trace)?
    } else {
        serde_json::to_string_pretty(&trace)?
    };

    match args.output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(json_string.as_bytes())?;
            file.write_all(b"\n")?;
        }
        None => {
            println!("{}", json_string);
        }
    }

    Ok(())
}
