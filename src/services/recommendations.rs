use serde::Deserialize;
use std::sync::Arc;

use crate::{
    artifacts::ArtifactStore,
    error::AppResult,
    models::{Catalog, Recommendation, SimilarityMatrix},
};

/// Maximum number of movies returned for a query
pub const RECOMMENDATION_LIMIT: usize = 5;

/// How the query movie is kept out of its own recommendations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfExclusion {
    /// Drop the query row from the candidates before ranking
    #[default]
    QueryRow,
    /// Drop whatever ranks first, assuming self-similarity is the row maximum.
    /// Matches the legacy behavior on matrices where that assumption breaks.
    TopRanked,
}

/// Ranks every catalog row by its similarity to `title`
///
/// The first catalog row titled exactly `title` is the query. Scores are read
/// from that row of the matrix and sorted descending; the sort is stable, so
/// equal scores keep ascending row order. At most [`RECOMMENDATION_LIMIT`]
/// movies are returned, and an unknown title yields an empty list.
///
/// `catalog` and `matrix` must be index-aligned; a row outside the matrix
/// panics.
pub fn rank_similar(
    catalog: &Catalog,
    matrix: &SimilarityMatrix,
    title: &str,
    exclusion: SelfExclusion,
) -> Vec<Recommendation> {
    let Some(idx) = catalog.position(title) else {
        return Vec::new();
    };

    let mut ranked: Vec<(usize, f64)> = matrix.row(idx).iter().copied().enumerate().collect();

    let skip = match exclusion {
        SelfExclusion::QueryRow => {
            ranked.retain(|(row, _)| *row != idx);
            0
        }
        SelfExclusion::TopRanked => 1,
    };

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .skip(skip)
        .take(RECOMMENDATION_LIMIT)
        .map(|(row, _)| Recommendation::from(&catalog.records()[row]))
        .collect()
}

/// Recommendation engine backed by the shared artifact store
#[derive(Clone)]
pub struct Recommender {
    store: Arc<ArtifactStore>,
    exclusion: SelfExclusion,
}

impl Recommender {
    pub fn new(store: Arc<ArtifactStore>, exclusion: SelfExclusion) -> Self {
        Self { store, exclusion }
    }

    /// Recommends movies similar to `title`
    ///
    /// Not finding the title is a normal outcome and returns an empty list.
    /// Artifact load failures propagate.
    pub async fn recommend(&self, title: &str) -> AppResult<Vec<Recommendation>> {
        let artifacts = self.store.artifacts().await?;
        let recommendations =
            rank_similar(&artifacts.catalog, &artifacts.matrix, title, self.exclusion);

        tracing::info!(
            title = %title,
            results = recommendations.len(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::codec::{encode_catalog, encode_matrix};
    use crate::artifacts::source::MockArtifactSource;
    use crate::models::{MovieId, MovieRecord};

    fn letters_catalog() -> Catalog {
        Catalog::new(
            ["A", "B", "C", "D", "E", "F"]
                .iter()
                .zip(1u64..)
                .map(|(title, id)| MovieRecord::new(*title, id))
                .collect(),
        )
    }

    fn matrix_with_row(idx: usize, row: Vec<f64>) -> SimilarityMatrix {
        let dim = row.len();
        let rows = (0..dim)
            .map(|i| {
                if i == idx {
                    row.clone()
                } else {
                    (0..dim).map(|j| if i == j { 1.0 } else { 0.0 }).collect()
                }
            })
            .collect();
        SimilarityMatrix::from_rows(rows).unwrap()
    }

    fn pairs(recommendations: &[Recommendation]) -> Vec<(&str, u64)> {
        recommendations
            .iter()
            .map(|r| (r.title.as_str(), r.movie_id.0))
            .collect()
    }

    #[test]
    fn test_ranks_by_descending_score() {
        let matrix = matrix_with_row(0, vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5]);
        let result = rank_similar(&letters_catalog(), &matrix, "A", SelfExclusion::QueryRow);
        assert_eq!(
            pairs(&result),
            vec![("B", 2), ("C", 3), ("D", 4), ("E", 5), ("F", 6)]
        );
    }

    #[test]
    fn test_unknown_title_is_empty() {
        let matrix = matrix_with_row(0, vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5]);
        let result = rank_similar(
            &letters_catalog(),
            &matrix,
            "Unknown Title",
            SelfExclusion::QueryRow,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_caps_at_limit_and_excludes_query() {
        let titles: Vec<MovieRecord> = (0..10u64)
            .map(|i| MovieRecord::new(format!("Movie {}", i), i))
            .collect();
        let catalog = Catalog::new(titles);
        let row = (0..10).map(|j| 1.0 - j as f64 / 20.0).rev().collect();
        let matrix = matrix_with_row(9, row);

        let result = rank_similar(&catalog, &matrix, "Movie 9", SelfExclusion::QueryRow);

        assert_eq!(result.len(), RECOMMENDATION_LIMIT);
        assert!(result.iter().all(|r| r.movie_id != MovieId(9)));
        assert_eq!(result[0].title, "Movie 8");
    }

    #[test]
    fn test_ties_keep_ascending_row_order() {
        let matrix = matrix_with_row(2, vec![0.4, 0.7, 1.0, 0.4, 0.7, 0.4]);
        let result = rank_similar(&letters_catalog(), &matrix, "C", SelfExclusion::QueryRow);
        assert_eq!(
            pairs(&result),
            vec![("B", 2), ("E", 5), ("A", 1), ("D", 4), ("F", 6)]
        );
    }

    #[test]
    fn test_duplicate_title_uses_first_row() {
        let catalog = Catalog::new(vec![
            MovieRecord::new("Solaris", 593),
            MovieRecord::new("Stalker", 1398),
            MovieRecord::new("Solaris", 2103),
        ]);
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.2, 0.9],
            vec![0.2, 1.0, 0.1],
            vec![0.9, 0.1, 1.0],
        ])
        .unwrap();

        let result = rank_similar(&catalog, &matrix, "Solaris", SelfExclusion::QueryRow);
        assert_eq!(pairs(&result), vec![("Solaris", 2103), ("Stalker", 1398)]);
    }

    #[test]
    fn test_small_catalogs_return_what_remains() {
        let single = Catalog::new(vec![MovieRecord::new("Rope", 1580)]);
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        assert!(rank_similar(&single, &matrix, "Rope", SelfExclusion::QueryRow).is_empty());
        assert!(rank_similar(&single, &matrix, "Rope", SelfExclusion::TopRanked).is_empty());

        let pair = Catalog::new(vec![
            MovieRecord::new("Rope", 1580),
            MovieRecord::new("Vertigo", 426),
        ]);
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.3], vec![0.3, 1.0]]).unwrap();
        let result = rank_similar(&pair, &matrix, "Vertigo", SelfExclusion::QueryRow);
        assert_eq!(pairs(&result), vec![("Rope", 1580)]);
    }

    #[test]
    fn test_policies_diverge_when_self_similarity_is_not_maximal() {
        let matrix = matrix_with_row(0, vec![0.5, 0.9, 0.8, 0.7, 0.6, 0.4]);
        let catalog = letters_catalog();

        let robust = rank_similar(&catalog, &matrix, "A", SelfExclusion::QueryRow);
        assert_eq!(
            pairs(&robust),
            vec![("B", 2), ("C", 3), ("D", 4), ("E", 5), ("F", 6)]
        );

        // Legacy mode drops "B" and lets the query itself through
        let legacy = rank_similar(&catalog, &matrix, "A", SelfExclusion::TopRanked);
        assert_eq!(
            pairs(&legacy),
            vec![("C", 3), ("D", 4), ("E", 5), ("A", 1), ("F", 6)]
        );
    }

    #[test]
    fn test_policies_agree_when_self_similarity_is_maximal() {
        let matrix = matrix_with_row(3, vec![0.2, 0.6, 0.6, 1.0, 0.1, 0.9]);
        let catalog = letters_catalog();
        assert_eq!(
            rank_similar(&catalog, &matrix, "D", SelfExclusion::QueryRow),
            rank_similar(&catalog, &matrix, "D", SelfExclusion::TopRanked)
        );
    }

    #[test]
    fn test_self_exclusion_deserializes_from_snake_case() {
        let policy: SelfExclusion = serde_json::from_str("\"top_ranked\"").unwrap();
        assert_eq!(policy, SelfExclusion::TopRanked);
        assert_eq!(SelfExclusion::default(), SelfExclusion::QueryRow);
    }

    fn recommender() -> Recommender {
        let mut source = MockArtifactSource::new();
        source.expect_name().return_const("mock");
        source.expect_location().returning(|kind| kind.to_string());
        source.expect_fetch().returning(|kind| match kind {
            crate::error::ArtifactKind::Catalog => encode_catalog(letters_catalog().records()),
            crate::error::ArtifactKind::SimilarityMatrix => {
                encode_matrix(&matrix_with_row(0, vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5]))
            }
        });

        Recommender::new(
            Arc::new(ArtifactStore::new(Arc::new(source))),
            SelfExclusion::QueryRow,
        )
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let recommender = recommender();
        let first = tokio_test::block_on(recommender.recommend("A")).unwrap();
        let second = tokio_test::block_on(recommender.recommend("A")).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[tokio::test]
    async fn test_recommend_unknown_title_through_store() {
        let recommender = recommender();
        assert!(recommender.recommend("Unknown Title").await.unwrap().is_empty());
    }
}
