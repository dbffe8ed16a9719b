//! Sketch-based candidate pruning.
//!
//! After profiling, every ordered column pair is a potential inclusion.
//! This phase discards the pairs the sketches already rule out: the
//! types must match, the statistics ranges must nest, and the Bloom
//! filter of the smaller side must be bit-wise subsumed by the larger.
//! All three checks are necessary conditions for true containment, so no
//! real inclusion is lost here.
//!
//! One task per column; each task scans the shared immutable snapshot
//! and produces that column's candidate set, which the coordinator
//! installs after the join.

use std::collections::BTreeSet;

use log::info;
use rayon::prelude::*;

use crate::model::{Column, Database};

/// `true` if `a`'s values could plausibly all be contained in `b`,
/// judged only by the sketches. Columns that never saw a row have no
/// type and match nothing.
pub fn similar(a: &Column, b: &Column) -> bool {
    let (Some(a_type), Some(b_type)) = (a.data_type, b.data_type) else {
        return false;
    };
    if a_type != b_type {
        return false;
    }
    match (&a.stats, &b.stats, &a.filter, &b.filter) {
        (Some(a_stats), Some(b_stats), Some(a_filter), Some(b_filter)) => {
            a_stats.fits_within(b_stats) && a_filter.subset_of(b_filter)
        }
        _ => false,
    }
}

/// Assign the global column order and fill every column's candidate set.
pub fn build_candidates(db: &mut Database) {
    db.assign_global_indexes();

    let sets: Vec<BTreeSet<usize>> = {
        let columns: Vec<&Column> = db.columns().collect();
        columns
            .par_iter()
            .map(|&column| {
                columns
                    .iter()
                    .filter(|&&other| other.global != column.global && similar(column, other))
                    .map(|&other| other.global)
                    .collect()
            })
            .collect()
    };

    let total: usize = sets.iter().map(BTreeSet::len).sum();
    for (global, set) in sets.into_iter().enumerate() {
        db.column_mut(global).candidates = set;
    }
    info!("{} columns, {} candidate pairs", db.column_count(), total);
}
