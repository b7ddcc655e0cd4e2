//! Delimited text tables with a header row.
//!
//! The delimiter is tab unless the header line carries no tab, in which case
//! it is comma. Fields are unquoted and trimmed; header lookups ignore case.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::io::open_maybe_gz;

#[derive(Debug, Clone)]
pub struct DelimitedTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn sniff_delimiter(header_line: &str) -> char {
    if header_line.contains('\t') { '\t' } else { ',' }
}

/// Splits one line, strips double quotes and surrounding whitespace.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter)
        .map(|f| f.replace('"', "").trim().to_string())
        .collect()
}

/// Position of `name` among `headers`, case-insensitive.
pub fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn lines(path: &Path) -> Result<impl Iterator<Item = std::io::Result<String>>> {
    let reader = open_maybe_gz(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(reader).lines())
}

/// Header fields and delimiter of `path`.
pub fn read_header(path: &Path) -> Result<(Vec<String>, char)> {
    let mut it = lines(path)?;
    let first = match it.next() {
        Some(line) => line.with_context(|| format!("failed to read {}", path.display()))?,
        None => bail!("file is empty: {}", path.display()),
    };
    let first = first.trim_start_matches('\u{feff}');
    if first.trim().is_empty() {
        bail!("first line is blank in {}", path.display());
    }
    let delimiter = sniff_delimiter(first);
    Ok((split_fields(first, delimiter), delimiter))
}

/// Number of non-blank lines after the header.
pub fn count_data_rows(path: &Path) -> Result<usize> {
    let mut it = lines(path)?;
    match it.next() {
        Some(line) => {
            let line = line.with_context(|| format!("failed to read {}", path.display()))?;
            if line.trim().is_empty() {
                bail!("first line is blank in {}", path.display());
            }
        }
        None => bail!("file is empty: {}", path.display()),
    }
    let mut count = 0usize;
    for line in it {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;
        if !line.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}

impl DelimitedTable {
    /// Loads the whole table. Blank lines are skipped; short rows are padded
    /// with empty fields.
    pub fn read(path: &Path) -> Result<Self> {
        let mut it = lines(path)?;
        let header_line = match it.next() {
            Some(line) => line.with_context(|| format!("failed to read {}", path.display()))?,
            None => bail!("file is empty: {}", path.display()),
        };
        let header_line = header_line.trim_start_matches('\u{feff}').to_string();
        if header_line.trim().is_empty() {
            bail!("first line is blank in {}", path.display());
        }
        let delimiter = sniff_delimiter(&header_line);
        let headers = split_fields(&header_line, delimiter);

        let mut rows = Vec::new();
        for line in it {
            let line = line.with_context(|| format!("failed to read {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = split_fields(&line, delimiter);
            if fields.len() < headers.len() {
                fields.resize(headers.len(), String::new());
            }
            rows.push(fields);
        }

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
        })
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        find_column(&self.headers, name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize> {
        match self.column(name) {
            Some(idx) => Ok(idx),
            None => bail!(
                "required column '{}' was not found in {}",
                name,
                self.path.display()
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Field `col` of row `row`; empty when the row is short.
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.rows[row].get(col).map(String::as_str).unwrap_or("")
    }
}
