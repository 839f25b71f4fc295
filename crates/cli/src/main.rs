use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use pinfft_core::{Buffer, Direction, Effort, Engine, PlanConfig, Real, transform_with};
use tracing_subscriber::EnvFilter;

mod signal;

use signal::SignalFile;

#[derive(Parser, Debug)]
#[command(name = "pinfft", about = "One-shot complex DFT over a JSON signal file")]
struct Cli {
    /// Path to the input signal (JSON: shape + [re, im] samples)
    #[arg(short, long)]
    input: PathBuf,
    /// Path to the output signal (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Path to a TOML plan configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the transform direction
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,
    /// Override the planner effort
    #[arg(long, value_enum)]
    effort: Option<EffortArg>,
    /// Divide a backward transform by the element count
    #[arg(long)]
    normalize: bool,
    /// DFT engine to plan with
    #[arg(long, value_enum, default_value_t = EngineArg::Rustfft)]
    engine: EngineArg,
    /// Suppress progress logs (stderr)
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionArg {
    Forward,
    Backward,
}

impl From<DirectionArg> for Direction {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Forward => Direction::Forward,
            DirectionArg::Backward => Direction::Backward,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EffortArg {
    Estimate,
    Measure,
    Patient,
    Exhaustive,
    WisdomOnly,
}

impl From<EffortArg> for Effort {
    fn from(value: EffortArg) -> Self {
        match value {
            EffortArg::Estimate => Effort::Estimate,
            EffortArg::Measure => Effort::Measure,
            EffortArg::Patient => Effort::Patient,
            EffortArg::Exhaustive => Effort::Exhaustive,
            EffortArg::WisdomOnly => Effort::WisdomOnly,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum EngineArg {
    Rustfft,
    Fftw,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let config = resolve_config(&cli)?;
    let engine = select_engine(cli.engine)?;

    if !cli.quiet {
        eprintln!("[cli] reading signal {}", cli.input.display());
    }
    let signal = SignalFile::load(&cli.input)?.into_array()?;
    if !cli.quiet {
        eprintln!(
            "[cli] {} transform of shape {:?} on {} (effort={:?})",
            config.direction,
            signal.dims(),
            engine.name(),
            config.effort
        );
    }

    let mut result = transform_with(engine, &signal, config.direction, config.flags())?;
    if config.normalize && config.direction == Direction::Backward {
        result.normalize();
    }

    SignalFile::from_array(&result).write(cli.output.as_deref())?;
    if !cli.quiet {
        match &cli.output {
            Some(path) => eprintln!("wrote {} samples to {}", result.len(), path.display()),
            None => eprintln!("wrote {} samples to stdout", result.len()),
        }
    }
    Ok(())
}

fn init_logging(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
    {
        eprintln!("[cli] logging disabled: {err}");
    }
}

/// File configuration with command-line overrides applied on top.
fn resolve_config(cli: &Cli) -> Result<PlanConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            if !cli.quiet {
                eprintln!("[cli] loading config {}", path.display());
            }
            PlanConfig::load(path)?
        }
        None => PlanConfig::default(),
    };
    if let Some(direction) = cli.direction {
        config.direction = direction.into();
    }
    if let Some(effort) = cli.effort {
        config.effort = effort.into();
    }
    config.normalize |= cli.normalize;
    config.validate()?;
    Ok(config)
}

fn select_engine(choice: EngineArg) -> Result<Arc<dyn Engine<f64>>, Box<dyn std::error::Error>> {
    match choice {
        EngineArg::Rustfft => Ok(<f64 as Real>::default_engine()),
        EngineArg::Fftw => pinfft_backend_fftw::engine::<f64>().ok_or_else(|| {
            "this build has no FFTW support; rebuild with --features fftw".into()
        }),
    }
}
