use serde::Deserialize;
use std::{sync::Arc, time::Duration};

use crate::{
    artifacts::{ArtifactSource, LocalFileSource, RemoteSource},
    error::{AppError, AppResult},
    services::SelfExclusion,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Local path of the catalog artifact
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Local path of the similarity matrix artifact
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Remote URL of the catalog artifact. Takes precedence over the path
    #[serde(default)]
    pub movies_url: Option<String>,

    /// Remote URL of the similarity matrix artifact
    #[serde(default)]
    pub similarity_url: Option<String>,

    /// TMDB API read access token
    pub api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL that poster paths are appended to
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Per-request timeout for poster lookups, in milliseconds
    #[serde(default = "default_poster_timeout_ms")]
    pub poster_timeout_ms: u64,

    /// How the query movie is excluded from its own recommendations
    #[serde(default)]
    pub self_exclusion: SelfExclusion,
}

fn default_movies_path() -> String {
    "artifacts/movies.bin".to_string()
}

fn default_similarity_path() -> String {
    "artifacts/similarity.bin".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_poster_timeout_ms() -> u64 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn poster_timeout(&self) -> Duration {
        Duration::from_millis(self.poster_timeout_ms)
    }

    /// Builds the artifact backend this configuration selects
    ///
    /// Both URLs set selects the remote source, neither selects local files.
    pub fn artifact_source(&self) -> AppResult<Arc<dyn ArtifactSource>> {
        match (&self.movies_url, &self.similarity_url) {
            (Some(movies_url), Some(similarity_url)) => Ok(Arc::new(RemoteSource::new(
                movies_url.clone(),
                similarity_url.clone(),
            ))),
            (None, None) => Ok(Arc::new(LocalFileSource::new(
                &self.movies_path,
                &self.similarity_path,
            ))),
            _ => Err(AppError::Config(
                "MOVIES_URL and SIMILARITY_URL must be set together".to_string(),
            )),
        }
    }
}
