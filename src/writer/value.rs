//! SQL literal rendering.

use crate::generator::faker::round_to;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use uuid::Uuid;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// SQL value representation
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    /// Fixed-point number: value and the number of decimals to print
    Decimal(f64, u8),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl SqlValue {
    pub fn decimal(value: f64, places: u8) -> Self {
        SqlValue::Decimal(value, places)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Render as a literal for a VALUES tuple.
    ///
    /// Numbers are bare, NULL is the keyword, everything else is a quoted
    /// string with embedded single quotes doubled.
    pub fn to_sql(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Int(n) => n.to_string(),
            SqlValue::Decimal(n, places) => format_decimal(*n, *places),
            SqlValue::Text(s) => quote(s),
            SqlValue::Date(d) => quote(&d.format(DATE_FORMAT).to_string()),
            SqlValue::DateTime(dt) => quote(&dt.format(DATETIME_FORMAT).to_string()),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Fixed-scale decimal literal. Values that round to zero print unsigned.
pub fn format_decimal(value: f64, places: u8) -> String {
    // Adding +0.0 turns -0.0 into 0.0
    let rounded = round_to(value, places) + 0.0;
    format!("{:.*}", places as usize, rounded)
}

/// Escape single quotes by doubling them
pub fn escape_string(s: &str) -> String {
    s.replace('\'', "''")
}

/// Wrap in single quotes after escaping
pub fn quote(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<&String> for SqlValue {
    fn from(s: &String) -> Self {
        SqlValue::Text(s.clone())
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        SqlValue::Int(n)
    }
}

impl From<Uuid> for SqlValue {
    fn from(id: Uuid) -> Self {
        SqlValue::Text(id.to_string())
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(d: NaiveDate) -> Self {
        SqlValue::Date(d)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(dt: NaiveDateTime) -> Self {
        SqlValue::DateTime(dt)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}
