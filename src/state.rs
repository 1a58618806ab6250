use std::sync::Arc;

use crate::{
    artifacts::{ArtifactSource, ArtifactStore},
    config::Config,
    error::AppResult,
    services::{PosterProvider, Recommender, SelfExclusion, Showcase, TmdbProvider},
};

/// Shared application state, built once at process start
///
/// Hosts hold one of these and hand out clones; all clones share the same
/// artifact store, so artifacts are still loaded only once.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
    pub recommender: Recommender,
    pub posters: Arc<dyn PosterProvider>,
    pub showcase: Showcase,
}

impl AppState {
    /// Wires the store, engine and TMDB provider from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let posters = TmdbProvider::new(
            config.api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_url.clone(),
            config.poster_timeout(),
        )?;

        tracing::info!(
            self_exclusion = ?config.self_exclusion,
            poster_timeout_ms = config.poster_timeout_ms,
            "Application state configured"
        );

        Ok(Self::new(
            config.artifact_source()?,
            Arc::new(posters),
            config.self_exclusion,
        ))
    }

    /// Wires the application from explicit collaborators
    pub fn new(
        source: Arc<dyn ArtifactSource>,
        posters: Arc<dyn PosterProvider>,
        exclusion: SelfExclusion,
    ) -> Self {
        let store = Arc::new(ArtifactStore::new(source));
        let recommender = Recommender::new(store.clone(), exclusion);
        let showcase = Showcase::new(store.clone(), recommender.clone(), posters.clone());

        Self {
            store,
            recommender,
            posters,
            showcase,
        }
    }
}
