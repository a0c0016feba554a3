use anyhow::Result;
use clap::Parser;
use descent_core::init_logging;
use descent_lib::{load_config, Simulation};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "descent.toml")]
    config: PathBuf,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for line-of-descent archives (overrides the config file)
    #[arg(long)]
    archive_dir: Option<String>,

    /// Write the final ancestry graph in DOT format
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(dir) = args.archive_dir {
        config.lineage.archive_dir = dir;
    }
    if args.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }
    let archiving = config.lineage.archive_interval > 0;

    let mut sim = Simulation::new(config)?;
    let ran = sim.run(args.ticks)?;

    if archiving {
        if let Some(path) = sim.archive_now()? {
            println!("Final line of descent: {}", path.display());
        }
    }
    if let Some(dot) = &args.dot {
        sim.write_dot(dot)?;
        println!("Ancestry graph: {}", dot.display());
    }

    let metrics = sim.metrics();
    println!(
        "Ran {} ticks (seed {}): population {}, births {}, fixed ancestors {}, ancestry size {}",
        ran,
        sim.seed(),
        sim.world().population().len(),
        metrics.births(),
        sim.fixation().stamped(),
        sim.world().ancestry().len()
    );
    Ok(())
}
