use clap::Parser;
use std::path::PathBuf;

use orca::glyph::{DOT_GLYPH, EMPTY_GLYPH};
use orca::midi::{MidiAdapter, MidiSink, MidirSink, NullSink};
use orca::{Engine, Grid};

#[derive(Parser, Debug)]
#[command(name = "orca")]
#[command(version = "0.1.0")]
#[command(about = "Orca grid evaluator", long_about = None)]
struct Args {
    /// Input grid file
    #[arg(required_unless_present = "list_ports")]
    path: Option<PathBuf>,

    /// Send note events to the first available MIDI output port
    #[arg(short, long)]
    use_midi: bool,

    /// Number of frames to evaluate
    #[arg(short, long, default_value_t = 8)]
    frames: usize,

    /// Seed for the random operator
    #[arg(short, long)]
    seed: Option<u64>,

    /// List available MIDI output ports
    #[arg(short = 'L', long)]
    list_ports: bool,
}

fn main() -> Result<(), orca::Error> {
    env_logger::init();
    let args = Args::parse();

    if args.list_ports {
        for name in MidirSink::list_ports("orca")? {
            println!("{}", name);
        }
        return Ok(());
    }

    let path = args.path.expect("path is required when not listing ports");
    let grid = Grid::from_path(&path)?;

    let mut engine = match args.seed {
        Some(seed) => Engine::with_seed(grid, seed),
        None => Engine::new(grid),
    };

    // MIDI is fatal when requested, a stub otherwise.
    let mut sink: Box<dyn MidiSink> = if args.use_midi {
        Box::new(MidirSink::open("orca")?)
    } else {
        Box::new(NullSink)
    };

    let mut adapter = MidiAdapter::new();
    for _ in 0..args.frames {
        engine.tick();
        adapter.pump(engine.grid_mut(), sink.as_mut())?;
    }
    adapter.flush(sink.as_mut())?;

    // Observable-empty substitution: empty cells render as spaces.
    for row in engine.grid().iter_rows() {
        let line: String = row
            .iter()
            .map(|&g| if g == DOT_GLYPH { EMPTY_GLYPH } else { g })
            .collect();
        println!("{}", line);
    }

    Ok(())
}
