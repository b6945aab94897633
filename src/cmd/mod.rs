mod generate;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bank-seed")]
#[command(version)]
#[command(about = "Generate synthetic banking data as batched SQL INSERT statements", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate branches, employees, customers, accounts and transactions
    Generate {
        /// Output SQL file (overwritten if it exists)
        #[arg(short, long, default_value = bank_seed::config::DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Random seed for reproducibility (random if not specified)
        #[arg(long)]
        seed: Option<u64>,

        /// YAML config file overriding record counts and batch size
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Rows per INSERT statement (overrides the config file)
        #[arg(short, long)]
        batch_size: Option<usize>,

        /// Show progress during generation
        #[arg(short, long)]
        progress: bool,

        /// Output the run summary as JSON instead of human-readable text
        #[arg(long)]
        json: bool,

        /// Generate and serialize without writing the output file
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            output,
            seed,
            config,
            batch_size,
            progress,
            json,
            dry_run,
        } => generate::run(output, seed, config, batch_size, progress, json, dry_run),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "bank-seed", &mut io::stdout());
            Ok(())
        }
    }
}
