//! Content-based movie recommendations from a precomputed similarity matrix,
//! with poster metadata from TMDB.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, AppResult, LoadError};
pub use state::AppState;
