//! mmkg-synth CLI: synthetic multi-modal knowledge-graph datasets.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use mmkg_synth::config::SynthConfig;
use mmkg_synth::dataset::Dataset;
use mmkg_synth::export::{JsonDirWriter, write_splits};
use mmkg_synth::partition::Partitioner;

#[derive(Parser)]
#[command(
    name = "mmkg-synth",
    version,
    about = "Synthetic multi-modal knowledge-graph dataset generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dataset and write train/valid/test split files.
    Generate {
        /// TOML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory (overrides `output.dir`).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Seed for generation and splitting (overrides `seed` and `split.seed`).
        #[arg(long)]
        seed: Option<u64>,

        /// Number of entities (overrides `universe.size`).
        #[arg(long)]
        entities: Option<usize>,

        /// Number of triple sampling rounds (overrides `graph.triples`).
        #[arg(long)]
        triples: Option<usize>,

        /// Print written and failed splits as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration as TOML.
    Config {
        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            output,
            seed,
            entities,
            triples,
            json,
        } => {
            let mut config = match config {
                Some(path) => SynthConfig::load(&path)?,
                None => SynthConfig::default(),
            };
            if let Some(dir) = output {
                config.output.dir = dir;
            }
            if let Some(seed) = seed {
                config.seed = seed;
                config.split.seed = seed;
            }
            if let Some(n) = entities {
                config.universe.size = n;
            }
            if let Some(n) = triples {
                config.graph.triples = n;
            }

            let dataset = Dataset::synthesize(&config)?;
            let partitioner = Partitioner::new(config.split_ratios(), config.split.seed)?
                .allow_empty(config.split.allow_empty_splits);
            let partition = dataset.partition(&partitioner)?;
            let writer = JsonDirWriter::create(&config.output.dir)?;

            let report = write_splits(&writer, dataset.project_splits(&partition));

            if json {
                let out = serde_json::to_string_pretty(&report.summary()).into_diagnostic()?;
                println!("{out}");
            } else {
                for summary in &report.written {
                    println!("Saved {}.json with {} nodes", summary.split, summary.nodes);
                }
                if report.is_success() {
                    println!(
                        "JSON files created in the {} directory.",
                        writer.dir().display()
                    );
                }
            }

            if let Some((split, err)) = report.failed.into_iter().next() {
                return Err(miette::Report::new(err)
                    .wrap_err(format!("split \"{split}\" was not written")));
            }
        }

        Commands::Config { output } => {
            let config = SynthConfig::default();
            match output {
                Some(path) => {
                    config.save(&path)?;
                    println!("Wrote default configuration to {}", path.display());
                }
                None => print!("{}", config.to_toml_string()?),
            }
        }
    }

    Ok(())
}
