//! TMDB (The Movie Database) provider
//!
//! Looks up `/movie/{id}` and builds an absolute poster URL from the
//! `poster_path` it returns.

use reqwest::{header, Client as HttpClient};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{MovieId, Poster},
    services::providers::PosterProvider,
};

const RESPONSE_LANGUAGE: &str = "en-US";

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        image_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            image_url,
        })
    }

    fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.image_url.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }

    async fn fetch_movie(&self, movie_id: MovieId) -> AppResult<TmdbMovie> {
        let url = format!("{}/movie/{}", self.api_url.trim_end_matches('/'), movie_id);
        let response = self
            .http_client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&self.api_key)
            .query(&[("language", RESPONSE_LANGUAGE)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "TMDB returned status {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    fn to_poster(&self, movie: TmdbMovie) -> Option<Poster> {
        let poster_path = movie.poster_path.filter(|path| !path.is_empty())?;
        Some(Poster::new(
            movie.title.unwrap_or_default(),
            self.poster_url(&poster_path),
        ))
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbProvider {
    async fn fetch_poster(&self, movie_id: MovieId) -> Poster {
        match self.fetch_movie(movie_id).await {
            Ok(movie) => match self.to_poster(movie) {
                Some(poster) => {
                    tracing::debug!(movie_id = %movie_id, provider = "tmdb", "Poster fetched");
                    poster
                }
                None => {
                    tracing::warn!(movie_id = %movie_id, provider = "tmdb", "Movie has no poster");
                    Poster::not_found()
                }
            },
            Err(e) => {
                tracing::warn!(
                    movie_id = %movie_id,
                    provider = "tmdb",
                    error = %e,
                    "Poster fetch failed"
                );
                Poster::not_found()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
