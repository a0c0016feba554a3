use clap::Parser;
use descent_io::{load_lineage, SavedLineage};
use descent_lib::{load_config, Genome};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect an archived line of descent", long_about = None)]
struct Args {
    /// Archive written by the simulation (lod-<tick>.jsonl or .jsonl.gz)
    input: PathBuf,

    /// Config the archive must have been produced with
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every organism, not only genome changes
    #[arg(short, long)]
    all: bool,

    /// Print a JSON summary instead of the listing
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    tick: u64,
    organisms: usize,
    distinct_genomes: usize,
    fixed: usize,
    final_generation: Option<f64>,
}

/// Number of runs of identical genomes along the lineage.
fn distinct_genomes(lineage: &SavedLineage<Genome>) -> usize {
    let mut count = 0;
    let mut previous: Option<&Genome> = None;
    for organism in &lineage.organisms {
        if previous != Some(&organism.representation) {
            count += 1;
        }
        previous = Some(&organism.representation);
    }
    count
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let lineage: SavedLineage<Genome> = load_lineage(&args.input)?;

    if let Some(path) = &args.config {
        let expected = load_config(path)?.fingerprint();
        match lineage.header.config_fingerprint.as_deref() {
            Some(found) if found == expected => println!("Config fingerprint matches {}", path.display()),
            Some(found) => anyhow::bail!("Config fingerprint mismatch: archive {}, config {}", found, expected),
            None => anyhow::bail!("Archive carries no config fingerprint"),
        }
    }

    if args.json {
        let summary = Summary {
            tick: lineage.header.tick,
            organisms: lineage.len(),
            distinct_genomes: distinct_genomes(&lineage),
            fixed: lineage.organisms.iter().filter(|o| o.fixation_time.is_some()).count(),
            final_generation: lineage.organisms.last().map(|o| o.generation),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Line of descent captured at tick {}", lineage.header.tick);
    println!("Organisms: {}", lineage.len());
    let mut previous: Option<&Genome> = None;
    for organism in &lineage.organisms {
        let changed = previous != Some(&organism.representation);
        if changed || args.all {
            let fixed = organism
                .fixation_time
                .map_or_else(|| "-".to_string(), |t| t.to_string());
            println!(
                "gen {:>8} fixed {:>8} {}",
                organism.generation,
                fixed,
                hex::encode(&organism.representation)
            );
        }
        previous = Some(&organism.representation);
    }
    println!("Distinct genomes along the lineage: {}", distinct_genomes(&lineage));
    Ok(())
}
