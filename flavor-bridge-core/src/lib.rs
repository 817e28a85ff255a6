pub mod allergen;
pub mod config;
pub mod error;
pub mod http;
pub mod profile;
pub mod provider;
pub mod recommend;
pub mod scoring;
pub mod similarity;
pub mod taxonomy;
pub mod types;

pub use config::{ConfigError, ProviderConfig, ProviderKind, RecommendConfig};
pub use error::{FetchError, ProviderError};
pub use http::{ApiClient, ApiClientBuilder, HttpClient, MockClient, MockResponse};
pub use profile::{build_profile, profile_record};
pub use provider::{
    create_provider, create_provider_from_env, CatalogProvider, FakeProvider, RecipeApiProvider,
    RecipeProvider,
};
pub use recommend::{
    rank_candidates, recommend, Diagnostics, Recommendation, RecommendationReport,
};
pub use scoring::{score, ScoreBreakdown};
pub use taxonomy::{taxonomy, Taxonomy};
pub use types::{
    CookingMethod, DetailedMetrics, RecipeProfile, RecipeRecord, ScoredCandidate, WeightedVector,
};
