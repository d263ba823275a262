// Dialogue Table Parser
// Parses comma-separated tables with a header row

use std::collections::HashMap;

/// Errors raised while splitting a table into records
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("table has no header row")]
    MissingHeader,

    #[error("unterminated quoted field starting on line {0}")]
    UnterminatedQuote(usize),
}

/// Parsed table: a header row plus data rows
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    columns: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse table content
    ///
    /// Fields are separated by commas. A field may be wrapped in double
    /// quotes, in which case it can contain commas, newlines and `""` for a
    /// literal quote. Blank lines are skipped. Header names are trimmed.
    pub fn parse(data: &str) -> Result<Self, TableError> {
        let mut records = split_records(data)?.into_iter();

        let headers: Vec<String> = records
            .next()
            .ok_or(TableError::MissingHeader)?
            .into_iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Ok(Table {
            headers,
            columns,
            rows: records.collect(),
        })
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Check whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate over data rows
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |fields| Record {
            columns: &self.columns,
            fields,
        })
    }
}

/// One data row, addressed by column name
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a HashMap<String, usize>,
    fields: &'a [String],
}

impl<'a> Record<'a> {
    /// Field value for a column, `None` if the column is unknown or the row is short
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = *self.columns.get(column)?;
        self.fields.get(index).map(String::as_str)
    }

    /// Field value with surrounding whitespace removed; blank values read as `None`
    pub fn get_trimmed(&self, column: &str) -> Option<&'a str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }
}

fn split_records(data: &str) -> Result<Vec<Vec<String>>, TableError> {
    const QUOTE: char = '"';
    const COMMA: char = ',';

    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut chars = data.chars().peekable();
    let mut line = 1;
    let mut in_quotes = false;
    let mut quote_line = 0;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            QUOTE if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
                quote_line = line;
            }
            COMMA => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                line += 1;
                finish_record(&mut records, &mut record, &mut field);
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(TableError::UnterminatedQuote(quote_line));
    }
    finish_record(&mut records, &mut record, &mut field);

    Ok(records)
}

fn finish_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    if record.is_empty() && field.trim().is_empty() {
        field.clear();
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}
