//! Generate command CLI handler.

use anyhow::Context;
use bank_seed::config::{GenerateConfig, GenerateYamlConfig};
use bank_seed::seeder::Seeder;
use std::path::PathBuf;
use std::time::Instant;

pub fn run(
    output: PathBuf,
    seed: Option<u64>,
    config: Option<PathBuf>,
    batch_size: Option<usize>,
    progress: bool,
    json: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut settings = GenerateConfig {
        output,
        // Generate random seed if not provided
        seed: seed.unwrap_or_else(rand::random),
        progress,
        json,
        dry_run,
        ..Default::default()
    };

    if let Some(ref path) = config {
        let yaml = GenerateYamlConfig::load(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;
        settings.merge_yaml(yaml);
    }
    if let Some(batch_size) = batch_size {
        settings.batch_size = batch_size;
    }
    settings.validate()?;

    if !json {
        eprintln!(
            "Generating {} rows (seed: {}, batch size: {})",
            settings.counts.total(),
            settings.seed,
            settings.batch_size
        );
    }

    let start_time = Instant::now();
    let stats = Seeder::new(settings).run()?;
    let elapsed = start_time.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    eprintln!();
    eprintln!("Generate Statistics:");
    for table in &stats.tables {
        eprintln!(
            "  {}: {} rows in {} INSERT statements",
            table.table, table.rows, table.statements
        );
    }
    eprintln!("  Manager updates: {}", stats.manager_updates);
    eprintln!(
        "  Total: {} rows, {} statements, {} bytes",
        stats.total_rows, stats.total_statements, stats.bytes_written
    );
    eprintln!("  Time: {:.3?}", elapsed);
    eprintln!();

    match stats.output {
        Some(path) => eprintln!("Successfully created {}", path.display()),
        None => eprintln!("Dry run: no file written (seed {})", stats.seed),
    }

    Ok(())
}
