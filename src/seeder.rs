//! End-to-end `generate` run: build the dataset, then serialize it to the
//! output file (or a byte sink for dry runs).

use crate::config::GenerateConfig;
use crate::generator::Generator;
use crate::progress::ProgressWriter;
use crate::writer::{create_output, SqlWriter, TableStats};
use anyhow::Context;
use chrono::NaiveDateTime;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Outcome of one run
#[derive(Debug, Clone, Serialize)]
pub struct SeedStats {
    pub seed: u64,
    /// `None` for dry runs
    pub output: Option<PathBuf>,
    pub batch_size: usize,
    pub tables: Vec<TableStats>,
    pub manager_updates: usize,
    pub total_rows: usize,
    pub total_statements: usize,
    pub bytes_written: u64,
}

pub struct Seeder {
    config: GenerateConfig,
    reference_time: Option<NaiveDateTime>,
}

impl Seeder {
    pub fn new(config: GenerateConfig) -> Self {
        Self {
            config,
            reference_time: None,
        }
    }

    /// Fix "now" for reproducible output.
    pub fn with_reference_time(mut self, now: NaiveDateTime) -> Self {
        self.reference_time = Some(now);
        self
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    pub fn run(&self) -> anyhow::Result<SeedStats> {
        self.config.validate()?;

        let pb = if self.config.progress && !self.config.json {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] {msg} {bytes}",
                )
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        if let Some(ref pb) = pb {
            pb.set_message("Generating mock data...");
        }

        let mut generator = Generator::new(self.config.seed, self.config.counts);
        if let Some(now) = self.reference_time {
            generator = generator.with_reference_time(now);
        }
        let data = generator.generate()?;

        let sink: Box<dyn Write> = if self.config.dry_run {
            Box::new(io::sink())
        } else {
            let file = create_output(&self.config.output).with_context(|| {
                format!(
                    "Cannot create output file: {}",
                    self.config.output.display()
                )
            })?;
            Box::new(file)
        };

        if let Some(ref pb) = pb {
            pb.set_message(format!("Writing {}...", self.config.output.display()));
        }

        let pb_writer = pb.clone();
        let counting = ProgressWriter::new(sink, move |bytes| {
            if let Some(ref pb) = pb_writer {
                pb.set_position(bytes);
            }
        });

        let mut writer = SqlWriter::new(counting, self.config.batch_size);
        let stats = writer.write_dataset(&data).with_context(|| {
            format!(
                "Failed writing SQL to {}",
                self.config.output.display()
            )
        })?;
        let counting = writer.into_inner()?;

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        Ok(SeedStats {
            seed: self.config.seed,
            output: (!self.config.dry_run).then(|| self.config.output.clone()),
            batch_size: self.config.batch_size,
            total_rows: stats.total_rows(),
            total_statements: stats.total_statements(),
            tables: stats.tables,
            manager_updates: stats.manager_updates,
            bytes_written: counting.bytes_written(),
        })
    }
}
