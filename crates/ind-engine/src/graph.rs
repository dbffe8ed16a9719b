//! The transitively closed inclusion graph.
//!
//! One dense adjacency row per column, stored as a [`BitSet`]:
//! `adjacency[i]` holds bit `j` when column `i`'s values are known to be
//! contained in column `j`'s. The diagonal is seeded at construction and
//! the relation is kept transitively closed by [`InclusionGraph::add`],
//! so a reader never has to chase paths.

use ind_core::BitSet;

use crate::model::Database;

/// Dense inclusion relation over the global column order.
#[derive(Debug)]
pub struct InclusionGraph {
    adjacency: Vec<BitSet>,
}

impl InclusionGraph {
    /// A graph over `n` columns with only the reflexive edges set.
    pub fn new(n: usize) -> Self {
        let mut adjacency: Vec<BitSet> = (0..n).map(|_| BitSet::new(n)).collect();
        for (i, row) in adjacency.iter_mut().enumerate() {
            row.set(i);
        }
        Self { adjacency }
    }

    /// `true` if `a ⊆ b` is recorded (reflexive edges included).
    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].test(b)
    }

    /// Record `a ⊆ b` and restore transitive closure.
    ///
    /// Every column that reaches `a` now also reaches `b` and everything
    /// `b` reaches; both row scans include the diagonal, so the base
    /// edge needs no special case. Returns the edges that were newly
    /// set — the caller uses them to drop the corresponding entries
    /// from its candidate sets, since an implied edge needs no
    /// verification. Adding an edge that is already implied returns
    /// nothing and changes nothing.
    pub fn add(&mut self, a: usize, b: usize) -> Vec<(usize, usize)> {
        let sources: Vec<usize> =
            (0..self.adjacency.len()).filter(|&i| self.adjacency[i].test(a)).collect();
        let targets: Vec<usize> = self.adjacency[b].ones().collect();

        let mut implied = Vec::new();
        for &i in &sources {
            for &j in &targets {
                if !self.adjacency[i].test(j) {
                    self.adjacency[i].set(j);
                    implied.push((i, j));
                }
            }
        }
        implied
    }

    /// Number of recorded non-trivial inclusions (diagonal excluded).
    pub fn count(&self) -> usize {
        let set: usize = self.adjacency.iter().map(BitSet::count).sum();
        set - self.adjacency.len()
    }

    /// All non-trivial inclusions in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.ones().map(move |j| (i, j)))
            .filter(|&(i, j)| i != j)
    }

    /// Print one `"<left>\t<right>"` line per non-trivial inclusion, in
    /// row-major order over the global column index.
    pub fn print(&self, db: &Database) {
        for (a, b) in self.edges() {
            println!("{}\t{}", db.label(a), db.label(b));
        }
    }
}
