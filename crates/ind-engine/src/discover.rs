//! The discovery driver: ordered verification with closure feedback.
//!
//! After the parallel phases, candidates are drained one at a time.
//! Columns with the most remaining candidates go first — every inclusion
//! confirmed early prunes more of the remaining work through transitive
//! closure. Verification itself is exact: the materialized value sets
//! are compared, never the filters, so sketch false positives die here.

use log::info;

use ind_core::Result;

use crate::candidates::build_candidates;
use crate::graph::InclusionGraph;
use crate::model::Database;
use crate::profile::profile_all;

/// Outcome of a discovery run.
#[derive(Debug)]
pub struct Discovery {
    /// The transitively closed inclusion relation.
    pub graph: InclusionGraph,
    /// Candidates checked against the value sets.
    pub verified: usize,
    /// Checks that confirmed an inclusion.
    pub accepted: usize,
}

/// Run the full pipeline over a loaded database: profile every table,
/// build candidate sets, then verify candidates until none remain.
pub fn discover(db: &mut Database) -> Result<Discovery> {
    profile_all(db)?;
    build_candidates(db);
    Ok(drain_candidates(db))
}

/// The sequential verification loop (the two parallel phases must have
/// run already).
fn drain_candidates(db: &mut Database) -> Discovery {
    let n = db.column_count();
    let mut graph = InclusionGraph::new(n);
    let mut order: Vec<usize> = (0..n).collect();
    let mut verified = 0;
    let mut accepted = 0;

    while let Some((a, b)) = next_candidate(db, &mut order) {
        verified += 1;
        if verify(db, a, b) {
            accepted += 1;
            for (i, j) in graph.add(a, b) {
                db.column_mut(i).candidates.remove(&j);
            }
        }
    }

    info!("verified {verified} candidates, accepted {accepted}");
    info!("{} inclusions after closure", graph.count());
    Discovery { graph, verified, accepted }
}

/// Pick the next candidate pair and remove it from its column's set.
///
/// `order` persists across calls: it is stable-sorted by descending
/// remaining-candidate count, so ties keep their previous relative
/// position, and the first column with work left contributes its
/// smallest-indexed candidate. Returns `None` once every set is empty.
fn next_candidate(db: &mut Database, order: &mut [usize]) -> Option<(usize, usize)> {
    order.sort_by_key(|&global| std::cmp::Reverse(db.column(global).candidates.len()));
    for &global in order.iter() {
        if let Some(candidate) = db.column_mut(global).candidates.pop_first() {
            return Some((global, candidate));
        }
    }
    None
}

/// Exact containment check on the materialized distinct-value sets.
fn verify(db: &Database, a: usize, b: usize) -> bool {
    let a_values = &db.column(a).values;
    let b_values = &db.column(b).values;
    a_values.iter().all(|value| b_values.contains(value))
}
