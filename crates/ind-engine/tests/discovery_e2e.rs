//! End-to-end discovery runs over scratch data directories.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use ind_engine::{Database, Discovery, discover};

/// Write a mapping plus table files into `dir`. Each entry is
/// `(table_name, file_name, columns, rows)`.
fn write_data_dir(dir: &Path, tables: &[(&str, &str, &[&str], &[&str])]) {
    let mut mapping = String::new();
    for (name, file, columns, rows) in tables {
        mapping.push_str(name);
        mapping.push('\t');
        mapping.push_str(file);
        for column in *columns {
            mapping.push('\t');
            mapping.push_str(column);
        }
        mapping.push('\n');

        let mut content = String::new();
        for row in *rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(dir.join(file), content).unwrap();
    }
    fs::write(dir.join("mapping.tsv"), mapping).unwrap();
}

fn run(dir: &Path) -> (Database, Discovery) {
    let mut db = Database::load(dir).unwrap();
    let discovery = discover(&mut db).unwrap();
    // Every edge the graph reports must hold on the raw value sets,
    // whether it was verified directly or implied by closure.
    for (a, b) in discovery.graph.edges() {
        let a_values = &db.column(a).values;
        let b_values = &db.column(b).values;
        assert!(
            a_values.iter().all(|v| b_values.contains(v)),
            "edge {a} -> {b} violates containment"
        );
    }
    (db, discovery)
}

fn rendered_edges(db: &Database, discovery: &Discovery) -> Vec<(String, String)> {
    discovery.graph.edges().map(|(a, b)| (db.label(a), db.label(b))).collect()
}

#[test]
fn one_directional_inclusion() {
    let dir = TempDir::new().unwrap();
    write_data_dir(
        dir.path(),
        &[
            ("T1", "T1.tsv", &["x"], &["1", "2"]),
            ("T2", "T2.tsv", &["x"], &["1", "2", "3"]),
        ],
    );

    let (db, discovery) = run(dir.path());
    let edges = rendered_edges(&db, &discovery);
    // The reverse direction never reaches verification: T2's wider
    // integer range fails the statistics check.
    assert_eq!(edges, vec![("T1[c000]".into(), "T2[c000]".into())]);
}

#[test]
fn transitive_chain_closes() {
    let dir = TempDir::new().unwrap();
    write_data_dir(
        dir.path(),
        &[
            ("A", "A.tsv", &["v"], &["1", "2"]),
            ("B", "B.tsv", &["v"], &["1", "2", "3"]),
            ("C", "C.tsv", &["v"], &["1", "2", "3", "4"]),
        ],
    );

    let (db, discovery) = run(dir.path());
    let mut edges = rendered_edges(&db, &discovery);
    edges.sort();
    assert_eq!(
        edges,
        vec![
            ("A[c000]".into(), "B[c000]".into()),
            ("A[c000]".into(), "C[c000]".into()),
            ("B[c000]".into(), "C[c000]".into()),
        ]
    );
    assert_eq!(discovery.graph.count(), 3);
}

#[test]
fn type_barrier_blocks_raw_string_inclusion() {
    // B's first row freezes it as a string column, so the pair is pruned
    // even though every raw value of A appears in B.
    let dir = TempDir::new().unwrap();
    write_data_dir(
        dir.path(),
        &[
            ("A", "A.tsv", &["v"], &["1", "2"]),
            ("B", "B.tsv", &["v"], &["foo", "1", "2"]),
        ],
    );

    let (_db, discovery) = run(dir.path());
    assert_eq!(discovery.graph.count(), 0);
    assert_eq!(discovery.verified, 0);
}

#[test]
fn sketch_false_positive_dies_in_verification() {
    // 1000000 and 0 share a filter bit (single-hash modulo the filter
    // width), and A's range nests inside B's, so the pair survives
    // pruning; exact verification then rejects it.
    let dir = TempDir::new().unwrap();
    write_data_dir(
        dir.path(),
        &[
            ("A", "A.tsv", &["v"], &["1000000"]),
            ("B", "B.tsv", &["v"], &["0", "2000000"]),
        ],
    );

    let (_db, discovery) = run(dir.path());
    assert_eq!(discovery.verified, 1);
    assert_eq!(discovery.accepted, 0);
    assert_eq!(discovery.graph.count(), 0);
}

#[test]
fn reflexive_edge_is_suppressed() {
    let dir = TempDir::new().unwrap();
    write_data_dir(dir.path(), &[("A", "A.tsv", &["v"], &["1", "2"])]);

    let (_db, discovery) = run(dir.path());
    assert_eq!(discovery.verified, 0);
    assert_eq!(discovery.graph.count(), 0);
    assert_eq!(discovery.graph.edges().count(), 0);
}

#[test]
fn missing_mapping_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = Database::load(dir.path()).unwrap_err();
    assert!(matches!(err, ind_engine::Error::Io(_)));
}

#[test]
fn equal_value_sets_yield_both_directions() {
    let dir = TempDir::new().unwrap();
    write_data_dir(
        dir.path(),
        &[
            ("L", "L.tsv", &["v"], &["a", "b"]),
            ("R", "R.tsv", &["v"], &["b", "a"]),
        ],
    );

    let (db, discovery) = run(dir.path());
    let mut edges = rendered_edges(&db, &discovery);
    edges.sort();
    assert_eq!(
        edges,
        vec![
            ("L[c000]".into(), "R[c000]".into()),
            ("R[c000]".into(), "L[c000]".into()),
        ]
    );
}

#[test]
fn empty_table_is_skipped_gracefully() {
    let dir = TempDir::new().unwrap();
    write_data_dir(
        dir.path(),
        &[
            ("E", "E.tsv", &["v"], &[]),
            ("F", "F.tsv", &["v"], &["1"]),
        ],
    );

    let (db, discovery) = run(dir.path());
    assert!(db.column(0).data_type.is_none());
    assert_eq!(discovery.verified, 0);
    assert_eq!(discovery.graph.count(), 0);
}

#[test]
fn frozen_int_column_still_matches_after_junk_rows() {
    // Both columns freeze as Int on their first row. The junk value
    // feeds the sentinel bit in both filters and is skipped by the
    // statistics, so A ⊆ B still verifies on the raw strings.
    let dir = TempDir::new().unwrap();
    write_data_dir(
        dir.path(),
        &[
            ("A", "A.tsv", &["v"], &["1", "oops"]),
            ("B", "B.tsv", &["v"], &["1", "oops", "2"]),
        ],
    );

    let (db, discovery) = run(dir.path());
    let edges = rendered_edges(&db, &discovery);
    assert_eq!(edges, vec![("A[c000]".into(), "B[c000]".into())]);
}

#[test]
fn short_row_aborts_discovery() {
    let dir = TempDir::new().unwrap();
    write_data_dir(dir.path(), &[("W", "W.tsv", &["a", "b"], &["1\t2", "3"])]);

    let mut db = Database::load(dir.path()).unwrap();
    let err = discover(&mut db).unwrap_err();
    assert!(matches!(err, ind_engine::Error::Data(_)), "got {err:?}");
}

#[test]
fn multi_column_tables_use_positional_ids() {
    let dir = TempDir::new().unwrap();
    write_data_dir(
        dir.path(),
        &[
            ("Orders", "orders.tsv", &["id", "customer"], &["1\tc1", "2\tc2"]),
            ("All", "all.tsv", &["key"], &["1", "2", "3"]),
        ],
    );

    let (db, discovery) = run(dir.path());
    let edges = rendered_edges(&db, &discovery);
    // Only the integer id column can sit inside the key column; the
    // customer column is text and the key column's range is wider.
    assert_eq!(edges, vec![("orders[c000]".into(), "all[c000]".into())]);
}

#[test]
fn repeated_runs_are_identical() {
    let dir = TempDir::new().unwrap();
    write_data_dir(
        dir.path(),
        &[
            ("A", "A.tsv", &["v"], &["x", "y"]),
            ("B", "B.tsv", &["v"], &["x", "y", "z"]),
            ("C", "C.tsv", &["v"], &["x", "y", "z", "w"]),
        ],
    );

    let (db1, d1) = run(dir.path());
    let (db2, d2) = run(dir.path());
    assert_eq!(rendered_edges(&db1, &d1), rendered_edges(&db2, &d2));
    assert_eq!(d1.verified, d2.verified);
    assert_eq!(d1.accepted, d2.accepted);
}
