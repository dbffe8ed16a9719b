//! Loading the table mapping.
//!
//! `<dataDir>/mapping.tsv` enumerates the tables: each line carries the
//! table name, the table file's path relative to the data directory, and
//! the column names — the mapping line is the header the table files
//! themselves don't have.

use std::path::Path;

use log::info;

use ind_core::{Error, Result};

use crate::model::{Database, Table};
use crate::reader::RowReader;

/// Name of the mapping file inside the data directory.
pub const MAPPING_FILE: &str = "mapping.tsv";

impl Database {
    /// Read `mapping.tsv` from `data_dir` and build the (unprofiled)
    /// database. Reading stops at end of file or the first empty line.
    pub fn load(data_dir: &Path) -> Result<Database> {
        let mut rows = RowReader::open(&data_dir.join(MAPPING_FILE))?;
        let mut tables = Vec::new();
        while let Some(fields) = rows.next_row()? {
            tables.push(build_table(data_dir, tables.len(), fields)?);
        }
        info!("found {} table definitions in {}", tables.len(), data_dir.display());
        Ok(Database::from_tables(tables))
    }
}

fn build_table(data_dir: &Path, table_index: usize, fields: Vec<String>) -> Result<Table> {
    let [name, relative, column_names @ ..] = fields.as_slice() else {
        return Err(mapping_arity_error(table_index, fields.len()));
    };
    if column_names.is_empty() {
        return Err(mapping_arity_error(table_index, fields.len()));
    }
    let id = Path::new(relative)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            Error::Mapping(format!("table {name:?}: cannot derive an id from path {relative:?}"))
        })?;
    let path = data_dir.join(relative);
    Ok(Table::new(table_index, name.clone(), id, path, column_names.to_vec()))
}

fn mapping_arity_error(table_index: usize, fields: usize) -> Error {
    Error::Mapping(format!(
        "line {} of {MAPPING_FILE} has {fields} fields, expected a table name, a file path, \
         and at least one column name",
        table_index + 1,
    ))
}
