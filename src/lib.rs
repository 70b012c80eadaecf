//! Aid Match - offer/need matching engine for mutual-aid coordination
//!
//! This library scores how well a posted offer serves a posted need and ranks
//! candidate pools: single-entity lookups in both directions, urgency-ordered
//! batch matching across every open need, and keyword recommendations.
//! Everything in `core` is pure and in-memory; the `services` and `commands`
//! modules back the `aid-match` binary.

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, distance::haversine_distance, text::text_relevance};
pub use error::MatchError;
pub use models::{
    BatchOptions, Confidence, Coordinates, MatchFactors, MatchOptions, MatchResult, Need, Offer,
    Recommendation,
};
