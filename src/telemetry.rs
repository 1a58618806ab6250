use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "movie_recommender=info";

/// Installs the global fmt subscriber, filtered by `RUST_LOG`
///
/// Safe to call more than once; a subscriber that is already installed (by an
/// earlier call or by the host) is left in place.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
