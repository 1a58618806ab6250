pub mod providers;
pub mod recommendations;
pub mod showcase;

pub use providers::{PosterProvider, TmdbProvider};
pub use recommendations::{rank_similar, Recommender, SelfExclusion, RECOMMENDATION_LIMIT};
pub use showcase::{RecommendationPage, Showcase};
