//! Generation settings.
//!
//! Record counts and batch size default to fixed constants; a YAML file can
//! override any subset of them:
//!
//! ```yaml
//! batch_size: 250
//! counts:
//!   branches: 5
//!   transactions: 1000
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BRANCHES: usize = 50;
pub const DEFAULT_EMPLOYEES: usize = 500;
pub const DEFAULT_CUSTOMERS: usize = 8000;
pub const DEFAULT_ACCOUNTS: usize = 12000;
pub const DEFAULT_TRANSACTIONS: usize = 40000;

/// Rows per INSERT statement
pub const DEFAULT_BATCH_SIZE: usize = 500;

pub const DEFAULT_OUTPUT: &str = "full_data_inserts.sql";

/// Number of rows to generate per table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordCounts {
    pub branches: usize,
    pub employees: usize,
    pub customers: usize,
    pub accounts: usize,
    pub transactions: usize,
}

impl Default for RecordCounts {
    fn default() -> Self {
        Self {
            branches: DEFAULT_BRANCHES,
            employees: DEFAULT_EMPLOYEES,
            customers: DEFAULT_CUSTOMERS,
            accounts: DEFAULT_ACCOUNTS,
            transactions: DEFAULT_TRANSACTIONS,
        }
    }
}

impl RecordCounts {
    pub fn total(&self) -> usize {
        self.branches + self.employees + self.customers + self.accounts + self.transactions
    }

    /// Reject counts whose foreign keys would have nothing to point at.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.employees > 0 && self.branches == 0 {
            anyhow::bail!("employees require at least one branch");
        }
        if self.branches > 0 && self.employees == 0 {
            anyhow::bail!("branches require at least one employee to act as manager");
        }
        if self.customers > 0 && self.branches == 0 {
            anyhow::bail!("customers require at least one branch");
        }
        if self.accounts > 0 && (self.customers == 0 || self.branches == 0) {
            anyhow::bail!("accounts require at least one customer and one branch");
        }
        if self.transactions > 0 && self.accounts == 0 {
            anyhow::bail!("transactions require at least one account");
        }
        Ok(())
    }
}

/// Contents of a `--config` YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateYamlConfig {
    pub batch_size: Option<usize>,
    pub counts: RecordCounts,
}

impl GenerateYamlConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: GenerateYamlConfig = serde_yaml_ng::from_str(content)?;
        Ok(config)
    }
}

/// Fully resolved settings for one `generate` run
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub output: PathBuf,
    pub counts: RecordCounts,
    pub batch_size: usize,
    pub seed: u64,
    pub progress: bool,
    pub json: bool,
    pub dry_run: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            counts: RecordCounts::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            seed: 0,
            progress: false,
            json: false,
            dry_run: false,
        }
    }
}

impl GenerateConfig {
    /// Apply a YAML file on top of the current settings.
    pub fn merge_yaml(&mut self, yaml: GenerateYamlConfig) {
        self.counts = yaml.counts;
        if let Some(batch_size) = yaml.batch_size {
            self.batch_size = batch_size;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.batch_size == 0 {
            anyhow::bail!("--batch-size must be greater than 0");
        }
        self.counts.validate()
    }
}
