use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod movie;
pub mod poster;

pub use movie::{Catalog, MovieRecord, Recommendation};
pub use poster::Poster;

/// TMDB identifier for a movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        MovieId(id)
    }
}

/// Square matrix of pairwise similarity scores, index-aligned with the catalog
///
/// Stored row-major in a single buffer. Every score is finite, so rows can be
/// ranked with a total order.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds a matrix from its rows, rejecting ragged or non-finite input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, String> {
        let dim = rows.len();
        let mut scores = Vec::with_capacity(dim * dim);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dim {
                return Err(format!(
                    "row {} has {} columns, expected {} for a square matrix",
                    i,
                    row.len(),
                    dim
                ));
            }
            if let Some(j) = row.iter().position(|score| !score.is_finite()) {
                return Err(format!("non-finite score at [{}][{}]", i, j));
            }
            scores.extend(row);
        }

        Ok(Self { dim, scores })
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Scores of row `idx` against every catalog row, self-similarity included
    ///
    /// Panics if `idx` is out of range.
    pub fn row(&self, idx: usize) -> &[f64] {
        assert!(
            idx < self.dim,
            "row {} out of range for {}x{} similarity matrix",
            idx,
            self.dim,
            self.dim
        );
        &self.scores[idx * self.dim..(idx + 1) * self.dim]
    }

    /// Copies the matrix back out as rows, the shape it is encoded in
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.dim == 0 {
            return Vec::new();
        }
        self.scores.chunks(self.dim).map(<[f64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_square() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.2], vec![0.3, 1.0]]).unwrap();
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix.row(0), &[1.0, 0.2]);
        assert_eq!(matrix.row(1), &[0.3, 1.0]);
    }

    #[test]
    fn test_from_rows_ragged_rejected() {
        let err = SimilarityMatrix::from_rows(vec![vec![1.0, 0.2], vec![0.3]]).unwrap_err();
        assert!(err.contains("row 1 has 1 columns"));
    }

    #[test]
    fn test_from_rows_non_finite_rejected() {
        let err =
            SimilarityMatrix::from_rows(vec![vec![1.0, f64::NAN], vec![0.3, 1.0]]).unwrap_err();
        assert_eq!(err, "non-finite score at [0][1]");
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = SimilarityMatrix::from_rows(Vec::new()).unwrap();
        assert_eq!(matrix.dim(), 0);
        assert!(matrix.to_rows().is_empty());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_row_out_of_range_panics() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        matrix.row(1);
    }

    #[test]
    fn test_movie_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&MovieId(603)).unwrap(), "603");
        assert_eq!(MovieId(603).to_string(), "603");
    }
}
