use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use generation_viewer::fast_forward::FastForwardController;
use generation_viewer::foraging::ForagingFactory;
use generation_viewer::headless::{self, HeadlessOptions};
use generation_viewer::{Error, RunContext, Settings, window};

#[derive(Parser)]
#[command(name = "generation-viewer")]
#[command(version)]
#[command(about = "Watch a foraging population evolve, one frame or ten generations at a time")]
struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the number of animals
    #[arg(long, global = true)]
    animals: Option<usize>,

    /// Override the number of food items
    #[arg(long, global = true)]
    food: Option<usize>,

    /// Fixed random seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the viewer window (default)
    Run,

    /// Drive the loop without a window
    Headless {
        /// Frames to run
        #[arg(short, long, default_value = "600")]
        frames: u64,

        /// Frame rate, 0 for as fast as possible
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Fast-forward after every n-th frame
        #[arg(long)]
        fast_forward_every: Option<u64>,
    },

    /// Write the default settings file
    Init {
        /// Output path
        #[arg(short, long, default_value = "viewer.yaml")]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "generation-viewer stopped");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    if let Some(animals) = cli.animals {
        settings.simulation.animal_count = animals;
    }
    if let Some(food) = cli.food {
        settings.simulation.food_count = food;
    }
    if cli.seed.is_some() {
        settings.simulation.seed = cli.seed;
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let ctx = RunContext::new(ForagingFactory, settings.simulation.clone())?;
            window::run(&settings, ctx)
        }
        Commands::Headless {
            frames,
            fps,
            fast_forward_every,
        } => {
            let mut ctx = RunContext::new(ForagingFactory, settings.simulation.clone())?;
            let options = HeadlessOptions {
                frames,
                fps,
                fast_forward_every,
                width: f64::from(settings.window.width),
            };
            let fast_forward = FastForwardController::from(&settings.fast_forward);
            headless::run(&mut ctx, &options, &fast_forward);
            Ok(())
        }
        Commands::Init { output } => {
            settings.save(&output)?;
            info!(path = %output.display(), "settings written");
            Ok(())
        }
    }
}
