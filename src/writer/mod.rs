//! SQL serializer.
//!
//! Writes a [`Dataset`] as batched `INSERT` statements in table order. The
//! branch table is written twice over: first inserted with `manager_id`
//! forced to `NULL`, then patched with one `UPDATE` per branch once every
//! branch row exists.

pub mod row;
pub mod value;

pub use row::InsertRow;
pub use value::SqlValue;

use crate::model::{Branch, Dataset};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const WRITER_BUFFER_SIZE: usize = 256 * 1024;

/// Column nulled in the initial branch INSERTs
pub const MANAGER_COLUMN: &str = "manager_id";

/// Rows and statements written for one table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub table: String,
    pub rows: usize,
    pub statements: usize,
}

/// Totals for a full dataset write
#[derive(Debug, Clone, Default, Serialize)]
pub struct WriteStats {
    pub tables: Vec<TableStats>,
    pub manager_updates: usize,
}

impl WriteStats {
    pub fn table(&self, name: &str) -> Option<&TableStats> {
        self.tables.iter().find(|t| t.table == name)
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }

    pub fn total_statements(&self) -> usize {
        self.tables.iter().map(|t| t.statements).sum::<usize>() + self.manager_updates
    }
}

pub struct SqlWriter<W: Write> {
    writer: W,
    batch_size: usize,
}

/// Create (or truncate) `path` behind a `WRITER_BUFFER_SIZE` buffer.
pub fn create_output(path: &Path) -> std::io::Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::with_capacity(WRITER_BUFFER_SIZE, file))
}

impl SqlWriter<BufWriter<File>> {
    pub fn create(path: &Path, batch_size: usize) -> std::io::Result<Self> {
        Ok(Self::new(create_output(path)?, batch_size))
    }
}

impl<W: Write> SqlWriter<W> {
    /// A batch size of 0 is treated as 1.
    pub fn new(writer: W, batch_size: usize) -> Self {
        Self {
            writer,
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Write every table, branches first, and flush.
    pub fn write_dataset(&mut self, data: &Dataset) -> std::io::Result<WriteStats> {
        let mut stats = WriteStats::default();

        stats.tables.push(self.write_branches(&data.branches)?);
        stats.manager_updates = self.write_manager_updates(&data.branches)?;
        stats.tables.push(self.write_table(&data.employees)?);
        stats.tables.push(self.write_table(&data.customers)?);
        stats.tables.push(self.write_table(&data.accounts)?);
        stats.tables.push(self.write_table(&data.transactions)?);

        self.flush()?;
        Ok(stats)
    }

    /// Section comment followed by the table's INSERT batches.
    pub fn write_table<T: InsertRow>(&mut self, rows: &[T]) -> std::io::Result<TableStats> {
        self.write_section_header(T::TABLE)?;
        self.write_inserts(rows, |row| row.values())
    }

    /// Branch section: every row goes in with a NULL manager.
    pub fn write_branches(&mut self, branches: &[Branch]) -> std::io::Result<TableStats> {
        self.write_section_header(Branch::TABLE)?;
        let manager_idx = Branch::COLUMNS
            .iter()
            .position(|c| *c == MANAGER_COLUMN);
        self.write_inserts(branches, |branch| {
            let mut values = branch.values();
            if let Some(idx) = manager_idx {
                values[idx] = SqlValue::Null;
            }
            values
        })
    }

    /// One UPDATE per branch that has a manager assigned.
    pub fn write_manager_updates(&mut self, branches: &[Branch]) -> std::io::Result<usize> {
        write!(
            self.writer,
            "\n-- Updating {} for {} --\n",
            MANAGER_COLUMN,
            Branch::TABLE
        )?;

        let mut count = 0;
        for branch in branches {
            if let Some(manager_id) = branch.manager_id {
                writeln!(self.writer, "{}", manager_update(branch.id, manager_id))?;
                count += 1;
            }
        }
        Ok(count)
    }

    /// Split `rows` into `batch_size` chunks, one INSERT statement each.
    pub fn write_inserts<T, F>(&mut self, rows: &[T], mut values: F) -> std::io::Result<TableStats>
    where
        T: InsertRow,
        F: FnMut(&T) -> Vec<SqlValue>,
    {
        let mut statements = 0;
        for batch in rows.chunks(self.batch_size) {
            let tuples: Vec<Vec<SqlValue>> = batch.iter().map(&mut values).collect();
            self.write_insert_statement(T::TABLE, T::COLUMNS, &tuples)?;
            statements += 1;
        }

        Ok(TableStats {
            table: T::TABLE.to_string(),
            rows: rows.len(),
            statements,
        })
    }

    /// Write a single multi-row INSERT. Does nothing for an empty batch.
    pub fn write_insert_statement(
        &mut self,
        table: &str,
        columns: &[&str],
        rows: &[Vec<SqlValue>],
    ) -> std::io::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        writeln!(
            self.writer,
            "INSERT INTO {} ({}) VALUES",
            table,
            columns.join(", ")
        )?;

        for (i, row) in rows.iter().enumerate() {
            let rendered: Vec<String> = row.iter().map(SqlValue::to_sql).collect();
            let terminator = if i + 1 == rows.len() { ";" } else { "," };
            writeln!(self.writer, "({}){}", rendered.join(", "), terminator)?;
        }

        Ok(())
    }

    pub fn write_section_header(&mut self, table: &str) -> std::io::Result<()> {
        write!(self.writer, "\n-- Inserting data into {} --\n", table)
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// `UPDATE branches SET manager_id = '<m>' WHERE id = '<b>';`
pub fn manager_update(branch_id: uuid::Uuid, manager_id: uuid::Uuid) -> String {
    format!(
        "UPDATE {} SET {} = {} WHERE id = {};",
        Branch::TABLE,
        MANAGER_COLUMN,
        SqlValue::from(manager_id),
        SqlValue::from(branch_id)
    )
}

/// Number of INSERT statements needed for `rows` rows.
pub fn statement_count(rows: usize, batch_size: usize) -> usize {
    rows.div_ceil(batch_size.max(1))
}
