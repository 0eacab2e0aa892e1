//! Sandfall Powder - headless Powder Game-style runner

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sandfall_core::simulation::ElementDefinitions;
use sandfall_core::world::World;
use sandfall_powder::config::PowderConfig;
use sandfall_powder::scenario::Scenario;
use sandfall_powder::{bundled_definitions, report};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Element definition file (RON); the bundled set is used otherwise
    #[arg(long)]
    elements: Option<PathBuf>,

    /// Configuration file (RON); `powder.ron` is picked up if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the world seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of ticks to run
    #[arg(long)]
    ticks: Option<u64>,

    /// Print the final grid as ASCII
    #[arg(long)]
    ascii: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = PowderConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        config.run.ticks = ticks;
    }
    log::debug!(
        "Effective config:\n{}",
        ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")?
    );

    let definitions = match &args.elements {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            ElementDefinitions::from_ron_str(&source)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => bundled_definitions().context("Failed to parse bundled elements")?,
    };

    log::info!("Starting Sandfall Powder");

    let mut world = World::new(config.world.dims(), &definitions, config.world.seed)
        .context("Failed to build world")?;
    let scenario = Scenario::from_config(&config.scenario, &world)?;

    let totals = sandfall_powder::run(&mut world, &scenario, &config.run);
    log::info!(
        "{}",
        report::stats_line(world.tick_count(), config.run.ticks, &totals)
    );

    print!("{}", report::census_table(&world));
    if args.ascii {
        print!("{}", report::render_ascii(&world));
    }

    Ok(())
}
