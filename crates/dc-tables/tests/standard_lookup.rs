use dc_tables::{DemandFactorTable, StandardTables, TableKind, group_table, workshop_table};
use proptest::prelude::*;

fn every_breakpoint_returns_stored_cell(table: &DemandFactorTable) {
    for (i, &row) in table.row_breakpoints().iter().enumerate() {
        for (j, &col) in table.col_breakpoints().iter().enumerate() {
            assert_eq!(
                table.lookup(row, col),
                table.cell(i, j).unwrap(),
                "drift at ({row}, {col})"
            );
        }
    }
}

#[test]
fn group_breakpoints_are_exact() {
    every_breakpoint_returns_stored_cell(&group_table());
}

#[test]
fn workshop_breakpoints_are_exact() {
    every_breakpoint_returns_stored_cell(&workshop_table());
}

#[test]
fn group_lookup_reads_known_cells() {
    let t = group_table();
    assert_eq!(t.lookup(4, 0.3), 1.47);
    assert_eq!(t.lookup(4, 0.4), 1.25);
    assert_eq!(t.lookup(14, 0.2), 1.27);
}

#[test]
fn group_lookup_interpolates_between_rows() {
    let t = group_table();
    // 11 sits halfway between rows 10 and 12 on the 0.2 column.
    let expected = 0.5 * 1.39 + 0.5 * 1.32;
    assert!((t.lookup(11, 0.2) - expected).abs() < 1e-12);
}

#[test]
fn low_end_queries_resolve_to_first_cell() {
    for t in [group_table(), workshop_table()] {
        assert_eq!(t.lookup(0, 0.0), 8.00);
        assert_eq!(t.lookup(-5, -1.0), 8.00);
    }
}

#[test]
fn far_queries_stay_in_last_interval() {
    let t = group_table();
    assert!((t.lookup(1000, 5.0) - 1.00).abs() < 1e-12);
    let w = workshop_table();
    assert!((w.lookup(1000, 5.0) - 0.80).abs() < 1e-12);
}

#[test]
fn workshop_row_beyond_last_breakpoint_uses_last_row() {
    let w = workshop_table();
    // 56 > 50: interpolation against rows 10 and 50 with the fraction clamped to 1.
    // Extrapolating the 10..50 slope instead would give 0.6925.
    assert!((w.lookup(56, 0.3) - 0.70).abs() < 1e-12);
}

#[test]
fn exact_hit_agrees_with_interpolated_limit() {
    // Approaching column 0.3 from below on row 4 ends on the stored cell.
    let t = group_table();
    let near = t.lookup(4, 0.3 - 1e-9);
    assert!((near - t.lookup(4, 0.3)).abs() < 1e-6);
}

#[test]
fn standard_tables_bundle_matches_free_functions() {
    let tables = StandardTables::default();
    assert_eq!(tables.get(TableKind::Group), &group_table());
    assert_eq!(tables.get(TableKind::Workshop), &workshop_table());
}

fn table_bounds(t: &DemandFactorTable) -> (f64, f64) {
    let (rows, cols) = t.dimensions();
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for i in 0..rows {
        for j in 0..cols {
            let v = t.cell(i, j).unwrap();
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    (lo, hi)
}

proptest! {
    #[test]
    fn lookup_never_leaves_table_range(n in -50_i64..2000, kv in -1.0_f64..5.0) {
        for t in [group_table(), workshop_table()] {
            let (lo, hi) = table_bounds(&t);
            let v = t.lookup(n, kv);
            prop_assert!(v.is_finite());
            prop_assert!(v >= lo - 1e-12 && v <= hi + 1e-12, "value {} outside [{}, {}]", v, lo, hi);
        }
    }

    #[test]
    fn lookup_is_non_increasing_in_count(n in 0_i64..60, kv in 0.0_f64..1.0) {
        // Every column of both standard tables is non-increasing down the rows.
        for t in [group_table(), workshop_table()] {
            prop_assert!(t.lookup(n + 1, kv) <= t.lookup(n, kv) + 1e-12);
        }
    }

    #[test]
    fn lookup_is_pure(n in -10_i64..100, kv in -0.5_f64..1.5) {
        let t = group_table();
        prop_assert_eq!(t.lookup(n, kv).to_bits(), t.lookup(n, kv).to_bits());
    }
}
