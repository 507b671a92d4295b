use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use toothpick_core::{
    grow, write_mosaic, GrowthStats, RenderOptions, RunConfig, SizingReport, MAX_ITERATIONS,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Grow the toothpick sequence and draw it with box-drawing characters
#[derive(Parser, Debug)]
#[command(name = "toothpick")]
#[command(about = "Toothpick sequence growth automaton", long_about = None)]
struct Args {
    /// Generations to grow (random in 0..16 when omitted)
    iterations: Option<u32>,

    /// Seed for the random generation count
    #[arg(short, long)]
    seed: Option<u64>,

    /// Connector glyphs drawn between adjacent columns
    #[arg(long, default_value_t = 3)]
    h_scale: u32,

    /// Filler rows drawn between adjacent rows
    #[arg(long, default_value_t = 1)]
    v_scale: u32,

    /// One glyph per cell (same as --h-scale 0 --v-scale 0)
    #[arg(long)]
    plain: bool,

    /// Print run statistics as JSON to stderr
    #[arg(long)]
    stats: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> RunConfig {
        let render = if self.plain {
            RenderOptions::plain()
        } else {
            RenderOptions {
                h_scale: self.h_scale,
                v_scale: self.v_scale,
            }
        };
        RunConfig {
            iterations: self.iterations,
            render,
        }
    }
}

#[derive(Serialize)]
struct RunSummary<'a> {
    config: RunConfig,
    sizing: &'a SizingReport,
    stats: &'a GrowthStats,
}

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.quiet);

    let config = args.config();
    let iterations = match args.seed {
        Some(seed) => config.resolve_iterations(&mut StdRng::seed_from_u64(seed)),
        None => config.resolve_iterations(&mut rand::rng()),
    };
    if config.iterations.is_none() {
        info!("No iteration count given, picked {}", iterations);
    }
    if iterations >= MAX_ITERATIONS {
        warn!(
            "{} iterations is beyond the addressable limit of {}",
            iterations, MAX_ITERATIONS
        );
    }

    let engine = grow(iterations).with_context(|| format!("growing {iterations} generations"))?;
    if engine.sizing().degraded() {
        warn!(
            "Ran {} of {} requested iterations",
            engine.sizing().granted,
            engine.sizing().requested
        );
    }

    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());
    write_mosaic(engine.grid(), config.render, out).context("writing mosaic")?;

    if args.stats {
        let summary = RunSummary {
            config: RunConfig {
                iterations: Some(engine.iterations()),
                ..config
            },
            sizing: engine.sizing(),
            stats: engine.stats(),
        };
        let mut err = io::stderr().lock();
        serde_json::to_writer_pretty(&mut err, &summary).context("writing stats")?;
        writeln!(err)?;
    }
    Ok(())
}
