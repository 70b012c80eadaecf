// Core algorithm exports
pub mod batch;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod recommend;
pub mod scoring;
pub mod text;

pub use batch::dedup_pairs;
pub use distance::{distance_between, haversine_distance};
pub use filters::{mentions_resource, need_is_eligible, offer_is_eligible, prioritize_needs};
pub use matcher::{sort_ranked, Matcher};
pub use scoring::calculate_match_score;
pub use text::text_relevance;
