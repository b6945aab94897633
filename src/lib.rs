//! Synthetic banking data generator.
//!
//! Generates FK-consistent branches, employees, customers, accounts and
//! transactions, and writes them as batched SQL INSERT statements.
//!
//! # Example
//!
//! ```rust
//! use bank_seed::config::RecordCounts;
//! use bank_seed::generator::Generator;
//! use bank_seed::writer::SqlWriter;
//!
//! let counts = RecordCounts {
//!     branches: 2,
//!     employees: 5,
//!     customers: 10,
//!     accounts: 10,
//!     transactions: 20,
//! };
//! let data = Generator::new(42, counts).generate().unwrap();
//!
//! let mut writer = SqlWriter::new(Vec::new(), 500);
//! let stats = writer.write_dataset(&data).unwrap();
//! assert_eq!(stats.manager_updates, 2);
//! ```

pub mod config;
pub mod generator;
pub mod model;
pub mod parser;
pub mod progress;
pub mod seeder;
pub mod writer;
