//! The profiled data model: a database of tables, tables of columns.
//!
//! Ownership is strictly tree-shaped: the [`Database`] owns its tables,
//! each [`Table`] owns its columns. Everything else — the column's
//! back-reference to its table, candidate sets, the inclusion graph —
//! refers to columns by index, never by pointer.

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use ind_core::{BloomFilter, DataType, Statistics};

/// One column of a table, together with everything profiling learns
/// about it.
#[derive(Debug)]
pub struct Column {
    /// Index of the owning table in [`Database::tables`].
    pub table: usize,
    /// Position within the owning table.
    pub position: usize,
    /// Index in the global column order; assigned by
    /// [`Database::assign_global_indexes`] once profiling is done.
    pub global: usize,
    /// Column name from the mapping file.
    pub name: String,
    /// Type frozen on the first observed field; `None` for columns of
    /// empty tables.
    pub data_type: Option<DataType>,
    /// Statistics variant matching `data_type`.
    pub stats: Option<Statistics>,
    /// Bloom filter variant matching `data_type`.
    pub filter: Option<BloomFilter>,
    /// Distinct raw field values observed during profiling.
    pub values: HashSet<String>,
    /// Global indexes of columns this one might be contained in. Ordered
    /// so candidate selection is deterministic.
    pub candidates: BTreeSet<usize>,
}

impl Column {
    pub(crate) fn new(table: usize, position: usize, name: String) -> Self {
        Self {
            table,
            position,
            global: 0,
            name,
            data_type: None,
            stats: None,
            filter: None,
            values: HashSet::new(),
            candidates: BTreeSet::new(),
        }
    }

    /// Freeze the column type from its first field and allocate the
    /// matching statistics and filter variants. The type never changes
    /// afterwards, whatever later rows look like.
    pub fn freeze_type(&mut self, value: &str) {
        let data_type = DataType::infer(value);
        self.stats = Some(Statistics::for_type(data_type));
        self.filter = Some(BloomFilter::for_type(data_type));
        self.data_type = Some(data_type);
    }

    /// Fold one raw field into the column's statistics, filter, and
    /// distinct-value set.
    pub fn observe(&mut self, value: &str) {
        if let Some(stats) = &mut self.stats {
            stats.record(value);
        }
        if let Some(filter) = &mut self.filter {
            filter.record(value);
        }
        if !self.values.contains(value) {
            self.values.insert(value.to_owned());
        }
    }
}

/// A table declared by the mapping file.
#[derive(Debug)]
pub struct Table {
    /// Human-readable name from the mapping file.
    pub name: String,
    /// Short identifier: the file stem of the mapping's relative path.
    pub id: String,
    /// Full path to the table's TSV file.
    pub path: PathBuf,
    /// Columns, in declaration order.
    pub columns: Vec<Column>,
}

impl Table {
    pub(crate) fn new(
        table_index: usize,
        name: String,
        id: String,
        path: PathBuf,
        column_names: Vec<String>,
    ) -> Self {
        let columns = column_names
            .into_iter()
            .enumerate()
            .map(|(position, column_name)| Column::new(table_index, position, column_name))
            .collect();
        Self { name, id, path, columns }
    }
}

/// All tables named by the mapping file, plus the global column order
/// used by the candidate and verification phases.
#[derive(Debug)]
pub struct Database {
    /// Tables in mapping order.
    pub tables: Vec<Table>,
    /// Global column index -> (table index, position).
    index: Vec<(usize, usize)>,
}

impl Database {
    pub(crate) fn from_tables(tables: Vec<Table>) -> Self {
        Self { tables, index: Vec::new() }
    }

    /// Assign every column its index in the global traversal order:
    /// tables in mapping order, columns in positional order. Runs on the
    /// coordinator between the profile and candidate phases.
    pub fn assign_global_indexes(&mut self) {
        self.index.clear();
        for (table_index, table) in self.tables.iter_mut().enumerate() {
            for (position, column) in table.columns.iter_mut().enumerate() {
                column.global = self.index.len();
                self.index.push((table_index, position));
            }
        }
    }

    /// Total number of columns across all tables.
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    /// Column by global index.
    ///
    /// # Panics
    ///
    /// Panics if global indexes have not been assigned yet.
    pub fn column(&self, global: usize) -> &Column {
        let (table, position) = self.index[global];
        &self.tables[table].columns[position]
    }

    /// Mutable column by global index.
    pub fn column_mut(&mut self, global: usize) -> &mut Column {
        let (table, position) = self.index[global];
        &mut self.tables[table].columns[position]
    }

    /// All columns in global order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.tables.iter().flat_map(|t| t.columns.iter())
    }

    /// Render a column for result output: `<tableId>[c<position>]` with
    /// the position zero-padded to three digits.
    pub fn label(&self, global: usize) -> String {
        let column = self.column(global);
        format!("{}[c{:03}]", self.tables[column.table].id, column.position)
    }
}
