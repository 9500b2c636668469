//! Compressed sparse row storage for the TF-IDF matrix.

use serde::{Deserialize, Serialize};

/// Row-major sparse matrix. Row `i` occupies `indptr[i]..indptr[i + 1]` of
/// `indices` and `data`; column indices within a row are strictly ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl CsrMatrix {
    /// Builds a matrix from per-row `(column, value)` entries sorted by column.
    #[must_use]
    pub fn from_rows(rows: &[Vec<(usize, f64)>], n_cols: usize) -> Self {
        let nnz = rows.iter().map(Vec::len).sum();
        let mut indptr = Vec::with_capacity(rows.len() + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut data = Vec::with_capacity(nnz);

        indptr.push(0);
        for row in rows {
            for &(col, value) in row {
                indices.push(col);
                data.push(value);
            }
            indptr.push(indices.len());
        }

        Self {
            n_cols,
            indptr,
            indices,
            data,
        }
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.indptr.len().saturating_sub(1)
    }

    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Fraction of zero cells; `0.0` when the shape is empty.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sparsity(&self) -> f64 {
        let cells = self.n_rows() * self.n_cols;
        if cells == 0 {
            return 0.0;
        }
        1.0 - self.nnz() as f64 / cells as f64
    }

    /// Column indices and values of row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.n_rows()`.
    #[must_use]
    pub fn row(&self, i: usize) -> (&[usize], &[f64]) {
        let range = self.indptr[i]..self.indptr[i + 1];
        (&self.indices[range.clone()], &self.data[range])
    }

    /// Expands row `i` into a dense vector of length `n_cols`.
    #[must_use]
    pub fn dense_row(&self, i: usize) -> Vec<f64> {
        let mut dense = vec![0.0; self.n_cols];
        let (indices, values) = self.row(i);
        for (&col, &value) in indices.iter().zip(values) {
            dense[col] = value;
        }
        dense
    }

    /// Dot product of every row with a dense vector of length `n_cols`.
    #[must_use]
    pub fn mul_dense(&self, dense: &[f64]) -> Vec<f64> {
        (0..self.n_rows())
            .map(|i| {
                let (indices, values) = self.row(i);
                indices
                    .iter()
                    .zip(values)
                    .map(|(&col, &value)| value * dense[col])
                    .sum()
            })
            .collect()
    }

    /// Checks the structural invariants of a deserialized matrix.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn validate(&self) -> Result<(), String> {
        if self.indptr.first() != Some(&0) {
            return Err("indptr must start at 0".to_string());
        }
        if self.indices.len() != self.data.len() {
            return Err(format!(
                "indices ({}) and data ({}) differ in length",
                self.indices.len(),
                self.data.len()
            ));
        }
        if self.indptr.last() != Some(&self.indices.len()) {
            return Err("indptr must end at the number of stored entries".to_string());
        }
        if let Some(i) = self.indptr.windows(2).position(|w| w[0] > w[1]) {
            return Err(format!("indptr decreases at row {i}"));
        }
        for i in 0..self.n_rows() {
            let (indices, _) = self.row(i);
            if indices.iter().any(|&col| col >= self.n_cols) {
                return Err(format!("row {i} has a column index out of range"));
            }
            if indices.windows(2).any(|w| w[0] >= w[1]) {
                return Err(format!("row {i} column indices are not strictly ascending"));
            }
        }
        Ok(())
    }
}
