//! Two-dimensional demand-factor table with ceiling selection and bilinear
//! interpolation.

use crate::error::{TableError, TableResult};
use tracing::trace;

/// Immutable coefficient grid indexed by effective equipment count (rows) and
/// group utilization factor (columns).
///
/// Both axes are strictly increasing. Coefficients are stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandFactorTable {
    rows: Vec<i64>,
    cols: Vec<f64>,
    values: Vec<f64>,
}

impl DemandFactorTable {
    /// Build a table, checking axis ordering and matrix shape.
    ///
    /// `values[r][c]` is the coefficient for `rows[r]` and `cols[c]`.
    pub fn new(rows: Vec<i64>, cols: Vec<f64>, values: Vec<Vec<f64>>) -> TableResult<Self> {
        if values.len() != rows.len() {
            return Err(TableError::ShapeMismatch {
                expected_rows: rows.len(),
                expected_cols: cols.len(),
                what: format!("{} rows", values.len()),
            });
        }
        if let Some((r, row)) = values.iter().enumerate().find(|(_, v)| v.len() != cols.len()) {
            return Err(TableError::ShapeMismatch {
                expected_rows: rows.len(),
                expected_cols: cols.len(),
                what: format!("{} columns in row {}", row.len(), r),
            });
        }

        let table = Self {
            rows,
            cols,
            values: values.into_iter().flatten().collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Build from flat row-major storage without checks. Callers must uphold
    /// the invariants verified by [`DemandFactorTable::validate`].
    pub(crate) fn from_parts_unchecked(rows: Vec<i64>, cols: Vec<f64>, values: Vec<f64>) -> Self {
        Self { rows, cols, values }
    }

    /// Check every construction invariant.
    pub fn validate(&self) -> TableResult<()> {
        if self.rows.is_empty() {
            return Err(TableError::EmptyAxis { axis: "rows" });
        }
        if self.cols.is_empty() {
            return Err(TableError::EmptyAxis { axis: "cols" });
        }
        if let Some(i) = (1..self.rows.len()).find(|&i| self.rows[i] <= self.rows[i - 1]) {
            return Err(TableError::NotIncreasing {
                axis: "rows",
                index: i,
            });
        }
        if let Some(i) = self.cols.iter().position(|c| !c.is_finite()) {
            return Err(TableError::NonFiniteBreakpoint {
                axis: "cols",
                index: i,
            });
        }
        if let Some(i) = (1..self.cols.len()).find(|&i| self.cols[i] <= self.cols[i - 1]) {
            return Err(TableError::NotIncreasing {
                axis: "cols",
                index: i,
            });
        }
        if self.values.len() != self.rows.len() * self.cols.len() {
            return Err(TableError::ShapeMismatch {
                expected_rows: self.rows.len(),
                expected_cols: self.cols.len(),
                what: format!("{} cells", self.values.len()),
            });
        }
        if let Some(i) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(TableError::NonFiniteValue {
                row: i / self.cols.len(),
                col: i % self.cols.len(),
            });
        }
        Ok(())
    }

    pub fn row_breakpoints(&self) -> &[i64] {
        &self.rows
    }

    pub fn col_breakpoints(&self) -> &[f64] {
        &self.cols
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }

    /// Stored coefficient, or `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows.len() || col >= self.cols.len() {
            return None;
        }
        self.values.get(row * self.cols.len() + col).copied()
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols.len() + col]
    }

    /// Demand factor for an effective count and a utilization factor.
    ///
    /// Selection uses the ceiling rule on both axes: the first breakpoint not
    /// smaller than the query, or the last breakpoint when the query exceeds
    /// them all. An exact hit on both axes returns the stored cell. Otherwise
    /// the four cells around `(max(i - 1, 0), i)` x `(max(j - 1, 0), j)` are
    /// blended bilinearly. Fractions are clamped to `[0, 1]`, so queries
    /// outside the table resolve to the edge of the first or last interval.
    ///
    /// Never fails. A NaN utilization propagates to a NaN result.
    pub fn lookup(&self, effective_count: i64, utilization: f64) -> f64 {
        let row = ceiling_index(&self.rows, |b| effective_count <= b);
        let col = ceiling_index(&self.cols, |b| utilization <= b);

        if self.rows[row] == effective_count && self.cols[col] == utilization {
            trace!(row, col, "exact table hit");
            return self.at(row, col);
        }

        let row_prev = row.saturating_sub(1);
        let col_prev = col.saturating_sub(1);

        let (row_lower, row_upper) = (self.rows[row_prev], self.rows[row]);
        // f64 arithmetic: i64 differences overflow for extreme counts or axes
        let row_fraction = if row_upper != row_lower {
            ((effective_count as f64 - row_lower as f64) / (row_upper as f64 - row_lower as f64))
                .clamp(0.0, 1.0)
        } else {
            0.0
        };

        let (col_lower, col_upper) = (self.cols[col_prev], self.cols[col]);
        let col_fraction = if col_upper != col_lower {
            ((utilization - col_lower) / (col_upper - col_lower)).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let lower_lower = self.at(row_prev, col_prev);
        let lower_upper = self.at(row_prev, col);
        let upper_lower = self.at(row, col_prev);
        let upper_upper = self.at(row, col);

        let value = lower_lower * (1.0 - row_fraction) * (1.0 - col_fraction)
            + lower_upper * (1.0 - row_fraction) * col_fraction
            + upper_lower * row_fraction * (1.0 - col_fraction)
            + upper_upper * row_fraction * col_fraction;

        trace!(
            row,
            col,
            row_fraction,
            col_fraction,
            value,
            "interpolated table lookup"
        );
        value
    }
}

/// Index of the first breakpoint accepted by `covers`, else the last index.
/// Axes are never empty once validated.
fn ceiling_index<T: Copy>(breakpoints: &[T], covers: impl Fn(T) -> bool) -> usize {
    breakpoints
        .iter()
        .position(|&b| covers(b))
        .unwrap_or(breakpoints.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> DemandFactorTable {
        DemandFactorTable::new(
            vec![1, 3, 5],
            vec![0.1, 0.2],
            vec![vec![4.0, 2.0], vec![3.0, 1.0], vec![2.0, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn exact_hit_returns_cell() {
        let t = small();
        assert_eq!(t.lookup(3, 0.2), 1.0);
        assert_eq!(t.lookup(1, 0.1), 4.0);
    }

    #[test]
    fn interpolates_between_rows() {
        let t = small();
        // Row 2 sits halfway between 1 and 3 on the 0.1 column.
        assert!((t.lookup(2, 0.1) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn interpolates_between_columns() {
        let t = small();
        assert!((t.lookup(1, 0.15) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn bilinear_blend_of_four_cells() {
        let t = small();
        // (2, 0.15): average of 4, 2, 3, 1.
        assert!((t.lookup(2, 0.15) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn low_end_clamps_to_first_cell() {
        let t = small();
        assert_eq!(t.lookup(0, 0.0), 4.0);
        assert_eq!(t.lookup(-5, -1.0), 4.0);
    }

    #[test]
    fn high_end_clamps_to_last_interval() {
        let t = small();
        assert!((t.lookup(1000, 5.0) - 1.0).abs() < 1e-12);
        // Exact row, beyond columns: upper column of the last interval.
        assert!((t.lookup(3, 0.9) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn extreme_counts_do_not_overflow() {
        let t = DemandFactorTable::new(
            vec![-10, 10],
            vec![0.1, 0.2],
            vec![vec![4.0, 2.0], vec![3.0, 1.0]],
        )
        .unwrap();
        assert_eq!(t.lookup(i64::MAX, 0.1), 3.0);
        assert_eq!(t.lookup(i64::MIN, 0.2), 2.0);

        let wide = DemandFactorTable::new(
            vec![i64::MIN, i64::MAX],
            vec![0.1],
            vec![vec![4.0], vec![3.0]],
        )
        .unwrap();
        assert!((wide.lookup(0, 0.1) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_unsorted_rows() {
        let err = DemandFactorTable::new(vec![1, 1], vec![0.1], vec![vec![1.0], vec![1.0]])
            .unwrap_err();
        assert_eq!(
            err,
            TableError::NotIncreasing {
                axis: "rows",
                index: 1
            }
        );
    }

    #[test]
    fn rejects_ragged_matrix() {
        let err = DemandFactorTable::new(vec![1, 2], vec![0.1, 0.2], vec![vec![1.0, 1.0], vec![1.0]])
            .unwrap_err();
        assert!(matches!(err, TableError::ShapeMismatch { .. }));
    }

    #[test]
    fn rejects_empty_axis() {
        let err = DemandFactorTable::new(vec![], vec![0.1], vec![]).unwrap_err();
        assert_eq!(err, TableError::EmptyAxis { axis: "rows" });
    }

    #[test]
    fn rejects_non_finite_cell() {
        let err =
            DemandFactorTable::new(vec![1], vec![0.1, 0.2], vec![vec![1.0, f64::NAN]]).unwrap_err();
        assert_eq!(err, TableError::NonFiniteValue { row: 0, col: 1 });
    }

    #[test]
    fn cell_accessor_bounds() {
        let t = small();
        assert_eq!(t.dimensions(), (3, 2));
        assert_eq!(t.cell(2, 0), Some(2.0));
        assert_eq!(t.cell(3, 0), None);
        assert_eq!(t.cell(0, 2), None);
    }
}
