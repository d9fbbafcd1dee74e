use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use virtual_piano_core::{
    InputSnapshot, KeyBinding, PhysicalKey, PianoConfig, PianoSession, SampleLibrary,
};

/// Frame delta used by the scripted demo loop, matching a 60 Hz host.
const DEMO_FRAME_DT: f32 = 1.0 / 60.0;

fn main() -> virtual_piano_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { config, hold } => run_demo(config.as_deref(), hold),
        Commands::Bindings => run_bindings(),
        Commands::Remap { from, to } => run_remap(from, to),
    }
}

/// Plays every bound note in table order through a simulated frame loop,
/// standing in for the windowed host: play events go to the log instead
/// of an audio engine, and the draw data is summarised instead of drawn.
fn run_demo(config: Option<&std::path::Path>, hold: f32) -> virtual_piano_core::Result<()> {
    let config = match config {
        Some(path) => PianoConfig::load(path)?,
        None => PianoConfig::default(),
    };
    tracing::info!(%hold, "starting scripted demo");

    let mut session = PianoSession::new(&config);
    let library = SampleLibrary::from_bindings(config.samples.clone(), session.bindings());
    let hold_frames = (hold / DEMO_FRAME_DT).ceil().max(1.0) as usize;
    let keys: Vec<PhysicalKey> = session.bindings().iter().map(|b| b.key).collect();

    for key in keys {
        let mut input = InputSnapshot::new();
        input.press(key);
        for _ in 0..hold_frames {
            let Some(output) = session.frame(&input, DEMO_FRAME_DT) else {
                continue;
            };
            for note in &output.sounds {
                let path = library.sample_path(note)?;
                tracing::info!(%key, %note, %path, "play");
            }
            for silent in &output.suppressed {
                tracing::warn!(key = %silent, "press edge had no bound note");
            }
        }
        input.release(key);
        let _ = session.frame(&input, DEMO_FRAME_DT);
    }

    let locked = session.bars().iter().filter(|bar| bar.locked).count();
    tracing::info!(
        bars = session.bars().len(),
        locked,
        "demo finished; bars still scrolling off-screen"
    );
    Ok(())
}

/// Prints the ordered binding table, the same data the remap UI lists.
fn run_bindings() -> virtual_piano_core::Result<()> {
    let session = PianoSession::new(&PianoConfig::default());
    print_bindings(session.bindings());
    Ok(())
}

/// Applies one rebind to a fresh session and prints the result. Nothing
/// is persisted; this demonstrates the remap flow end to end.
fn run_remap(from: char, to: char) -> virtual_piano_core::Result<()> {
    let mut session = PianoSession::new(&PianoConfig::default());
    let from = PhysicalKey::new(from)?;
    let to = PhysicalKey::new(to)?;

    session.open_remap();
    session.rebind(from, to)?;
    session.close_remap();

    tracing::info!(%from, %to, "rebound");
    print_bindings(session.bindings());
    Ok(())
}

fn print_bindings(bindings: &[KeyBinding]) {
    for binding in bindings {
        println!("{} -> {} ({})", binding.key, binding.note, binding.label);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "On-screen piano core, driven from the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scripted session that plays every bound note once.
    Demo {
        /// Optional JSON configuration overriding the built-in defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// How long each key is held, in seconds.
        #[arg(long, default_value_t = 0.5)]
        hold: f32,
    },
    /// Print the key-to-note binding table.
    Bindings,
    /// Move a note to a different physical key and print the new table.
    Remap {
        /// Key currently triggering the note.
        from: char,
        /// Key that should trigger it instead.
        to: char,
    },
}
