use anyhow::{Context, Result};
use clap::Parser;
use snfusion_core::{CrossSections, Engine, EngineConfig};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Simulate fusion processes happening inside a supernova and stream the
/// elemental abundances to a CSV-like file.
#[derive(Parser)]
#[command(name = "snfusion-gen")]
#[command(about = "Monte Carlo generator for supernova fusion runs")]
struct Cli {
    /// Number of iterations to simulate
    #[arg(short = 'n', long, default_value_t = 100_000)]
    num_iters: usize,

    /// Carbon ratio (0-100) giving the initial carbon/oxygen composition
    #[arg(long, default_value_t = 60)]
    carbon_ratio: u32,

    /// Seed used for the Monte Carlo sampler
    #[arg(long, default_value_t = 1234)]
    seed: u64,

    /// Number of nuclei in the initial population
    #[arg(long, default_value_t = 10_000)]
    pool_size: usize,

    /// Optional JSON config file; takes precedence over the simulation flags
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file name
    #[arg(short = 'o', long, default_value = "output.csv")]
    output: PathBuf,

    /// Print the default configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    if let Some(path) = &cli.config {
        let file = File::open(path)
            .with_context(|| format!("failed to open config file {}", path.display()))?;
        let config: EngineConfig = serde_json::from_reader(BufReader::new(file))
            .context("failed to parse config file")?;
        return Ok(config);
    }
    Ok(EngineConfig {
        num_iters: cli.num_iters,
        num_carbons: cli.carbon_ratio,
        seed: cli.seed,
        pool_size: cli.pool_size,
        ..EngineConfig::default()
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&EngineConfig::default())?);
        return Ok(());
    }

    let config = load_config(&cli)?;
    let engine =
        Engine::new(config, CrossSections::standard()).context("invalid configuration")?;

    info!("processing...");
    let begin = Instant::now();

    let file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    let summary = engine
        .run(BufWriter::new(file))
        .context("error running engine")?;

    info!(
        "processing... [done]: {:?} ({} fusions over {} iterations, {} nuclei left)",
        begin.elapsed(),
        summary.accepted,
        summary.iterations,
        summary.final_len,
    );
    Ok(())
}
