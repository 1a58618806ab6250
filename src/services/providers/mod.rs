//! Poster metadata provider abstraction
//!
//! Poster art is cosmetic, so providers absorb every failure and answer with
//! [`Poster::not_found`] instead of an error.

use crate::models::{MovieId, Poster};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Fetch the display title and poster URL for a movie
    ///
    /// Never fails: transport errors, timeouts, error statuses and unusable
    /// responses all produce the not-found sentinel.
    async fn fetch_poster(&self, movie_id: MovieId) -> Poster;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
