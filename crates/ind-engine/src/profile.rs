//! Parallel one-pass column profiling.
//!
//! Each table is profiled by its own task: every row is read once and
//! each field is dispatched to its column, which freezes its type on the
//! first row and then accumulates statistics, filter bits, and distinct
//! values. Tasks share nothing mutable, so the fan-out is a plain rayon
//! iterator joined by `try_for_each`.

use log::{debug, info};
use rayon::prelude::*;

use ind_core::{Error, Result};

use crate::model::{Database, Table};
use crate::reader::RowReader;

/// Profile every table in the database, one parallel task per table.
/// The first error (I/O or a malformed row) aborts the whole phase.
pub fn profile_all(db: &mut Database) -> Result<()> {
    db.tables.par_iter_mut().try_for_each(profile_table)
}

/// Profile a single table: a single pass over its TSV file.
pub fn profile_table(table: &mut Table) -> Result<()> {
    info!("profiling {}", table.path.display());
    let mut rows = RowReader::open(&table.path)?;
    let width = table.columns.len();
    let mut row_count: u64 = 0;

    while let Some(row) = rows.next_row()? {
        if row.len() < width {
            return Err(Error::Data(format!(
                "{}: row {} has {} fields, expected {width}",
                table.path.display(),
                row_count + 1,
                row.len(),
            )));
        }
        for (column, field) in table.columns.iter_mut().zip(&row) {
            if row_count == 0 {
                column.freeze_type(field);
            }
            column.observe(field);
        }
        row_count += 1;
    }

    for column in &mut table.columns {
        if let Some(stats) = &mut column.stats {
            stats.finish(row_count);
        }
    }

    info!("profiled {} ({} rows)", table.path.display(), row_count);
    for column in &table.columns {
        match (&column.data_type, &column.stats, &column.filter) {
            (Some(data_type), Some(stats), Some(filter)) => debug!(
                "  {}.{}: {} | {} distinct | {} filter bits | {stats}",
                table.name,
                column.name,
                data_type,
                column.values.len(),
                filter.bit_count(),
            ),
            _ => debug!("  {}.{}: no rows", table.name, column.name),
        }
    }
    Ok(())
}
