//! Line-oriented TSV row reader.
//!
//! The format is deliberately bare: one row per line, fields separated
//! by tabs, no quoting or escaping, no header. A fully empty line is
//! treated the same as end of file, for both table files and the
//! mapping file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ind_core::Result;

/// Buffered reader yielding one TSV row at a time.
#[derive(Debug)]
pub struct RowReader {
    reader: BufReader<File>,
    path: PathBuf,
    line: String,
}

impl RowReader {
    /// Open `path` for row reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self { reader: BufReader::new(file), path: path.to_owned(), line: String::new() })
    }

    /// Path this reader was opened on, for error reporting.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the next row. Returns `None` at end of file or on a fully
    /// empty line; otherwise the line is split on tabs with the trailing
    /// newline removed.
    pub fn next_row(&mut self) -> Result<Option<Vec<String>>> {
        self.line.clear();
        let read = self.reader.read_line(&mut self.line)?;
        if read == 0 {
            return Ok(None);
        }
        let line = self.line.trim_end_matches('\n').trim_end_matches('\r');
        if line.is_empty() {
            return Ok(None);
        }
        Ok(Some(line.split('\t').map(str::to_owned).collect()))
    }
}
