//! Cursor-based parser for single INSERT / UPDATE statements and literals.

use super::{InsertStatement, ParsedValue, Statement, UpdateStatement};

/// Parse one statement (trailing `;` optional).
pub fn parse_statement(stmt: &[u8]) -> anyhow::Result<Statement> {
    let mut cursor = Cursor::new(stmt);
    cursor.skip_whitespace();

    let statement = if cursor.eat_keyword("INSERT") {
        Statement::Insert(cursor.parse_insert()?)
    } else if cursor.eat_keyword("UPDATE") {
        Statement::Update(cursor.parse_update()?)
    } else {
        anyhow::bail!(
            "unsupported statement: {}",
            String::from_utf8_lossy(&stmt[..stmt.len().min(40)]).trim()
        );
    };

    cursor.skip_whitespace();
    cursor.eat(b';');
    cursor.skip_whitespace();
    if !cursor.at_end() {
        anyhow::bail!("unexpected trailing input at byte {}", cursor.pos);
    }
    Ok(statement)
}

/// Parse a lone literal such as `NULL`, `-12.50` or `'O''Brien'`.
pub fn parse_literal(literal: &str) -> anyhow::Result<ParsedValue> {
    let mut cursor = Cursor::new(literal.as_bytes());
    cursor.skip_whitespace();
    let value = cursor.parse_value()?;
    cursor.skip_whitespace();
    if !cursor.at_end() {
        anyhow::bail!("unexpected input after literal: {}", literal);
    }
    Ok(value)
}

struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: u8) -> anyhow::Result<()> {
        self.skip_whitespace();
        if !self.eat(expected) {
            anyhow::bail!(
                "expected '{}' at byte {}",
                expected as char,
                self.pos
            );
        }
        Ok(())
    }

    /// Case-insensitive keyword that is not the prefix of a longer word
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let end = self.pos + keyword.len();
        if end > self.input.len() {
            return false;
        }
        if !self.input[self.pos..end].eq_ignore_ascii_case(keyword.as_bytes()) {
            return false;
        }
        if self.input.get(end).is_some_and(|b| is_ident_byte(*b)) {
            return false;
        }
        self.pos = end;
        true
    }

    fn expect_keyword(&mut self, keyword: &str) -> anyhow::Result<()> {
        if !self.eat_keyword(keyword) {
            anyhow::bail!("expected {} at byte {}", keyword, self.pos);
        }
        Ok(())
    }

    /// Bare or backtick/double-quoted identifier
    fn identifier(&mut self) -> anyhow::Result<String> {
        self.skip_whitespace();
        let quote = match self.peek() {
            Some(q @ (b'`' | b'"')) => {
                self.pos += 1;
                Some(q)
            }
            _ => None,
        };

        let start = self.pos;
        while let Some(b) = self.peek() {
            let done = match quote {
                Some(q) => b == q,
                None => !is_ident_byte(b),
            };
            if done {
                break;
            }
            self.pos += 1;
        }
        let name = String::from_utf8(self.input[start..self.pos].to_vec())?;

        if let Some(q) = quote {
            self.expect(q)?;
        }
        if name.is_empty() {
            anyhow::bail!("expected identifier at byte {}", start);
        }
        Ok(name)
    }

    fn parse_insert(&mut self) -> anyhow::Result<InsertStatement> {
        self.expect_keyword("INTO")?;
        let table = self.identifier()?;

        self.expect(b'(')?;
        let mut columns = vec![self.identifier()?];
        loop {
            self.skip_whitespace();
            if self.eat(b',') {
                columns.push(self.identifier()?);
            } else {
                break;
            }
        }
        self.expect(b')')?;

        self.expect_keyword("VALUES")?;

        let mut rows = vec![self.parse_tuple()?];
        loop {
            self.skip_whitespace();
            if self.eat(b',') {
                rows.push(self.parse_tuple()?);
            } else {
                break;
            }
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                anyhow::bail!(
                    "row {} of {} has {} values for {} columns",
                    i + 1,
                    table,
                    row.len(),
                    columns.len()
                );
            }
        }

        Ok(InsertStatement {
            table,
            columns,
            rows,
        })
    }

    fn parse_update(&mut self) -> anyhow::Result<UpdateStatement> {
        let table = self.identifier()?;
        self.expect_keyword("SET")?;
        let column = self.identifier()?;
        self.expect(b'=')?;
        self.skip_whitespace();
        let value = self.parse_value()?;
        self.expect_keyword("WHERE")?;
        let key_column = self.identifier()?;
        self.expect(b'=')?;
        self.skip_whitespace();
        let key = self.parse_value()?;

        Ok(UpdateStatement {
            table,
            column,
            value,
            key_column,
            key,
        })
    }

    /// Parse a row "(val1, val2, ...)"
    fn parse_tuple(&mut self) -> anyhow::Result<Vec<ParsedValue>> {
        self.expect(b'(')?;
        let mut values = Vec::new();
        loop {
            self.skip_whitespace();
            values.push(self.parse_value()?);
            self.skip_whitespace();
            if self.eat(b',') {
                continue;
            }
            self.expect(b')')?;
            return Ok(values);
        }
    }

    /// Parse a single value (string, number, NULL)
    fn parse_value(&mut self) -> anyhow::Result<ParsedValue> {
        match self.peek() {
            Some(b'\'') => self.parse_string_value(),
            Some(b) if b == b'-' || b == b'.' || b.is_ascii_digit() => self.parse_number_value(),
            _ if self.eat_keyword("NULL") => Ok(ParsedValue::Null),
            _ => anyhow::bail!("expected a literal at byte {}", self.pos),
        }
    }

    /// Parse a string literal 'value'
    fn parse_string_value(&mut self) -> anyhow::Result<ParsedValue> {
        self.pos += 1; // Skip opening quote

        let mut value = Vec::new();
        loop {
            match self.peek() {
                None => anyhow::bail!("unterminated string literal"),
                Some(b'\'') => {
                    // Doubled quote is an escaped quote
                    if self.input.get(self.pos + 1) == Some(&b'\'') {
                        value.push(b'\'');
                        self.pos += 2;
                    } else {
                        self.pos += 1;
                        break;
                    }
                }
                Some(b) => {
                    value.push(b);
                    self.pos += 1;
                }
            }
        }

        Ok(ParsedValue::Text(String::from_utf8(value)?))
    }

    /// Parse `-?digits[.digits][e[+-]digits]`, kept verbatim
    fn parse_number_value(&mut self) -> anyhow::Result<ParsedValue> {
        let start = self.pos;
        self.eat(b'-');

        let mut digits = 0;
        let mut has_dot = false;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                digits += 1;
                self.pos += 1;
            } else if b == b'.' && !has_dot {
                has_dot = true;
                self.pos += 1;
            } else if (b == b'e' || b == b'E') && digits > 0 {
                // Scientific notation
                self.pos += 1;
                if matches!(self.peek(), Some(b'+' | b'-')) {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }

        if digits == 0 {
            anyhow::bail!("malformed number at byte {}", start);
        }

        let raw = String::from_utf8(self.input[start..self.pos].to_vec())?;
        Ok(ParsedValue::Number(raw))
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
