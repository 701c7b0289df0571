use anyhow::Result;
use log::*;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Loader/formatter settings, threaded through explicitly rather than held
/// in any global.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub delimiter: u8,
}

impl Default for Config {
    fn default() -> Config {
        Config { delimiter: b',' }
    }
}

/// A single CSV column: the header name plus the raw values of that field
/// across all data rows, in row order.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub n_rows: usize,
}

#[derive(Debug)]
pub enum LoadError {
    FileNotFound(PathBuf),
    /// A row whose field count disagrees with the header, or bytes which
    /// aren't valid UTF-8.  Such rows are rejected, not padded or truncated.
    MalformedInput {
        line: u64,
        reason: String,
    },
    /// No header row, or a header row with no data rows after it.
    EmptyFile(PathBuf),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::FileNotFound(path) => {
                write!(f, "FileNotFound: no such file: {}", path.display())
            }
            LoadError::MalformedInput { line, reason } => {
                write!(f, "MalformedInput: line {}: {}", line, reason)
            }
            LoadError::EmptyFile(path) => {
                write!(f, "EmptyFile: no data rows in {}", path.display())
            }
        }
    }
}
impl std::error::Error for LoadError {}

/// Read the file at `path` into a [`Table`].  The file handle only lives as
/// long as this call, whether loading succeeds or not.
pub fn load_csv(path: &Path, cfg: &Config) -> Result<Table> {
    let file = File::open(path).map_err(|e| -> anyhow::Error {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound(path.to_path_buf()).into()
        } else {
            e.into()
        }
    })?;
    let table = read_table(file, cfg)?;
    if table.n_rows == 0 {
        return Err(LoadError::EmptyFile(path.to_path_buf()).into());
    }
    Ok(table)
}

/// The delimiter-splitting, header-taking core of the loader.  Callers are
/// expected to map a rowless table to [`LoadError::EmptyFile`]; this
/// function doesn't know the path.
pub fn read_table(mut rdr: impl Read, cfg: &Config) -> Result<Table> {
    let mut buf = Vec::new();
    rdr.read_to_end(&mut buf)?;
    let raw = match std::str::from_utf8(&buf) {
        Ok(raw) => raw,
        Err(e) => {
            let line = 1 + buf[..e.valid_up_to()].iter().filter(|&&b| b == b'\n').count() as u64;
            return Err(LoadError::MalformedInput {
                line,
                reason: "invalid UTF-8".to_string(),
            }
            .into());
        }
    };

    let patched = mark_blank_lines(raw);
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(cfg.delimiter)
        .flexible(true)
        .from_reader(patched.as_bytes());
    let headers = rdr.headers()?.clone();
    let mut columns = headers
        .iter()
        .map(|name| Column {
            name: name.to_string(),
            values: Vec::new(),
        })
        .collect::<Vec<_>>();

    let mut n_rows = 0;
    for row in rdr.records() {
        let row = row?;
        if row.len() != columns.len() {
            return Err(LoadError::MalformedInput {
                line: row.position().map_or(0, |p| p.line()),
                reason: format!("expected {} fields, found {}", columns.len(), row.len()),
            }
            .into());
        }
        for (column, field) in columns.iter_mut().zip(row.iter()) {
            column.values.push(field.to_string());
        }
        n_rows += 1;
    }

    debug!("read {} rows x {} columns", n_rows, columns.len());
    Ok(Table { columns, n_rows })
}

/// The csv reader skips blank records outright, but to us an empty line is a
/// row holding one missing value (which the field-count check then rejects
/// in multi-column files).  Splice in an explicit empty field so such lines
/// survive parsing.  Blank lines inside a quoted field are left alone, and
/// no newlines are added, so record line numbers still match the input.
fn mark_blank_lines(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    let mut in_quotes = false;
    for line in raw.split_inclusive('\n') {
        let body = line.trim_end_matches(|c| c == '\n' || c == '\r');
        if body.is_empty() && !in_quotes {
            out.push_str("\"\"");
        }
        out.push_str(line);
        in_quotes ^= body.matches('"').count() % 2 == 1;
    }
    out
}
