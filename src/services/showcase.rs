use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    artifacts::ArtifactStore,
    error::AppResult,
    models::Poster,
    services::{providers::PosterProvider, recommendations::Recommender},
};

/// Everything a page needs to offer a title picker and show recommendations
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationPage {
    /// All catalog titles, in catalog order
    pub movie_titles: Vec<String>,
    pub selected_movie: String,
    /// One entry per recommendation, most similar first
    pub posters: Vec<Poster>,
}

/// Presentation-side composition of the engine and poster enrichment
#[derive(Clone)]
pub struct Showcase {
    store: Arc<ArtifactStore>,
    recommender: Recommender,
    posters: Arc<dyn PosterProvider>,
}

impl Showcase {
    pub fn new(
        store: Arc<ArtifactStore>,
        recommender: Recommender,
        posters: Arc<dyn PosterProvider>,
    ) -> Self {
        Self {
            store,
            recommender,
            posters,
        }
    }

    /// Builds the page for an optional selected title
    ///
    /// Without a selection the page only lists titles. Poster lookups for the
    /// recommendations run concurrently; a failed lookup still occupies its
    /// slot as the not-found placeholder.
    pub async fn page(&self, selected: Option<&str>) -> AppResult<RecommendationPage> {
        let movie_titles = self.store.titles().await?;
        let selected_movie = selected.unwrap_or_default().to_string();

        if selected_movie.is_empty() {
            return Ok(RecommendationPage {
                movie_titles,
                selected_movie,
                posters: Vec::new(),
            });
        }

        let recommendations = self.recommender.recommend(&selected_movie).await?;

        let posters = join_all(recommendations.iter().map(|recommendation| async move {
            let mut poster = self.posters.fetch_poster(recommendation.movie_id).await;
            if poster.title.is_empty() {
                poster.title = recommendation.title.clone();
            }
            poster
        }))
        .await;

        let missing = posters.iter().filter(|p| p.is_not_found()).count();
        if missing > 0 {
            tracing::warn!(
                selected = %selected_movie,
                provider = self.posters.name(),
                missing,
                "Some posters could not be fetched"
            );
        }

        Ok(RecommendationPage {
            movie_titles,
            selected_movie,
            posters,
        })
    }
}
