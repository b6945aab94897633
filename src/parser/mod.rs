//! Reader for the SQL this crate emits.
//!
//! Splits a script into statements (skipping `--` comments) and parses the
//! two statement shapes the writer produces: multi-row `INSERT ... VALUES`
//! and the branch manager `UPDATE`. Values come back as [`ParsedValue`]s so
//! generated output can be compared against the records it came from.

mod statement;

pub use statement::{parse_literal, parse_statement};

use crate::writer::value::{format_decimal, SqlValue, DATETIME_FORMAT, DATE_FORMAT};
use std::io::{BufRead, BufReader, Read};

pub const SMALL_BUFFER_SIZE: usize = 64 * 1024;

/// A literal as it appeared in the SQL text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedValue {
    Null,
    /// Bare numeric literal, kept verbatim
    Number(String),
    /// Quoted string with doubled quotes already collapsed
    Text(String),
}

impl ParsedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ParsedValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParsedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParsedValue::Number(raw) => raw.parse().ok(),
            _ => None,
        }
    }

    /// Whether this literal is exactly what `value` renders to.
    pub fn matches_value(&self, value: &SqlValue) -> bool {
        match (self, value) {
            (ParsedValue::Null, SqlValue::Null) => true,
            (ParsedValue::Number(raw), SqlValue::Int(n)) => raw.parse::<i64>().ok() == Some(*n),
            (ParsedValue::Number(raw), SqlValue::Decimal(n, places)) => {
                *raw == format_decimal(*n, *places)
            }
            (ParsedValue::Text(s), SqlValue::Text(expected)) => s == expected,
            (ParsedValue::Text(s), SqlValue::Date(d)) => *s == d.format(DATE_FORMAT).to_string(),
            (ParsedValue::Text(s), SqlValue::DateTime(dt)) => {
                *s == dt.format(DATETIME_FORMAT).to_string()
            }
            _ => false,
        }
    }
}

/// `INSERT INTO table (cols) VALUES (...), (...)`
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<ParsedValue>>,
}

impl InsertStatement {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Every row's value for `column`
    pub fn column_values(&self, column: &str) -> Vec<&ParsedValue> {
        match self.column_index(column) {
            Some(idx) => self.rows.iter().filter_map(|r| r.get(idx)).collect(),
            None => Vec::new(),
        }
    }
}

/// `UPDATE table SET column = value WHERE key_column = key`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub table: String,
    pub column: String,
    pub value: ParsedValue,
    pub key_column: String,
    pub key: ParsedValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(InsertStatement),
    Update(UpdateStatement),
}

impl Statement {
    pub fn table(&self) -> &str {
        match self {
            Statement::Insert(s) => &s.table,
            Statement::Update(s) => &s.table,
        }
    }
}

/// Streams `;`-terminated statements out of a reader.
///
/// Semicolons inside single-quoted strings do not terminate a statement and
/// `--` comments are dropped up to the end of their line.
pub struct StatementReader<R: Read> {
    reader: BufReader<R>,
    stmt_buffer: Vec<u8>,
}

impl<R: Read> StatementReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, SMALL_BUFFER_SIZE)
    }

    pub fn with_capacity(reader: R, buffer_size: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(buffer_size, reader),
            stmt_buffer: Vec::with_capacity(32 * 1024),
        }
    }

    /// Next statement including its `;`, or `None` at end of input.
    pub fn read_statement(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        self.stmt_buffer.clear();

        let mut inside_quote = false;
        let mut inside_comment = false;

        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                let rest = std::mem::take(&mut self.stmt_buffer);
                if rest.iter().all(u8::is_ascii_whitespace) {
                    return Ok(None);
                }
                return Ok(Some(rest));
            }

            let mut consumed = 0;
            let mut found_terminator = false;

            for &b in buf {
                consumed += 1;

                if inside_comment {
                    if b == b'\n' {
                        inside_comment = false;
                        self.stmt_buffer.push(b'\n');
                    }
                    continue;
                }

                if inside_quote {
                    self.stmt_buffer.push(b);
                    if b == b'\'' {
                        inside_quote = false;
                    }
                    continue;
                }

                match b {
                    b'\'' => {
                        inside_quote = true;
                        self.stmt_buffer.push(b);
                    }
                    b'-' if self.stmt_buffer.last() == Some(&b'-') => {
                        self.stmt_buffer.pop();
                        inside_comment = true;
                    }
                    b';' => {
                        self.stmt_buffer.push(b);
                        found_terminator = true;
                        break;
                    }
                    _ => self.stmt_buffer.push(b),
                }
            }

            self.reader.consume(consumed);

            if found_terminator {
                let result = std::mem::take(&mut self.stmt_buffer);
                return Ok(Some(result));
            }
        }
    }
}

/// Parse every statement in a script.
pub fn parse_script(sql: &str) -> anyhow::Result<Vec<Statement>> {
    let mut reader = StatementReader::new(sql.as_bytes());
    let mut statements = Vec::new();
    while let Some(stmt) = reader.read_statement()? {
        statements.push(parse_statement(&stmt)?);
    }
    Ok(statements)
}
