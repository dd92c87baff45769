use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use traffic_gen::generation::{Generator, GeneratorConfig};
use traffic_gen::output::{self, Destination};
use traffic_gen::seed::Seed;

#[derive(Parser)]
#[command(name = "traffic_gen")]
#[command(about = "Generate simulation input files")]
struct Cli {
    /// Path to the generator configuration. "-" reads it from stdin
    #[arg(value_name = "CONFIG_PATH")]
    config_path: String,

    /// The number of files to be generated
    #[arg(long, short = 'n', default_value = "1", allow_negative_numbers = true)]
    number: i64,

    /// Seed for the pseudo-random number generator, in hex. A fresh seed is
    /// drawn when omitted
    #[arg(long)]
    seed: Option<Seed>,

    /// Output path template. "-" writes to stdout. Substitutes {seed} (hex),
    /// {n} (number of files) and {i} (index of the current file, from 0)
    #[arg(long, default_value = output::STDOUT)]
    output_path: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    let count = match output::validate_arguments(cli.number, cli.seed.as_ref(), &cli.output_path) {
        Ok(count) => count,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&cli, count) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, count: usize) -> Result<()> {
    let config = read_config(&cli.config_path)?;
    let mut generator =
        Generator::from_config(&config).context("Invalid generator configuration")?;

    if count == 1 {
        let seed = match &cli.seed {
            Some(seed) => {
                info!("Using seed passed as argument; hex representation: {}", seed);
                seed.clone()
            }
            None => {
                let seed = Seed::fresh();
                info!("Generated new seed; hex representation: {}", seed);
                seed
            }
        };
        generate_one(&mut generator, &cli.output_path, &seed, 0, 1)?;
    } else {
        for index in 0..count {
            let seed = Seed::fresh();
            generator.reset();
            generate_one(&mut generator, &cli.output_path, &seed, index, count)?;
        }
    }

    Ok(())
}

fn read_config(path: &str) -> Result<GeneratorConfig> {
    if path == "-" {
        return GeneratorConfig::from_reader(io::stdin().lock())
            .context("Failed to parse configuration from stdin");
    }

    let file = File::open(path).with_context(|| format!("Failed to open configuration {}", path))?;
    GeneratorConfig::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse configuration {}", path))
}

fn generate_one(
    generator: &mut Generator,
    template: &str,
    seed: &Seed,
    index: usize,
    count: usize,
) -> Result<()> {
    let mut rng = seed.rng();
    let record = generator
        .generate(&mut rng)
        .and_then(|scenario| scenario.to_record())
        .with_context(|| format!("Failed to generate scenario with seed {}", seed))?;

    match output::write_scenario(template, &record, seed, index, count)? {
        Destination::Stdout => {}
        Destination::File(path) => info!("Wrote scenario {} (seed {}) to {}", index, seed, path.display()),
    }
    Ok(())
}
