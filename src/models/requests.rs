use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Coordinates;

/// Limits for a single-entity lookup (need→offers or offer→needs)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOptions {
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            max_distance_km: default_max_distance_km(),
            min_score: default_min_score(),
            max_results: default_max_results(),
        }
    }
}

fn default_max_distance_km() -> f64 { 100.0 }
fn default_min_score() -> u32 { 20 }
fn default_max_results() -> usize { 10 }

/// Limits for automatic matching across every open need.
///
/// The score bar is stricter than for browsed lookups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOptions {
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: f64,
    #[serde(default = "default_batch_min_score")]
    pub min_score: u32,
    #[serde(default = "default_max_matches_per_need")]
    pub max_matches_per_need: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_distance_km: default_max_distance_km(),
            min_score: default_batch_min_score(),
            max_matches_per_need: default_max_matches_per_need(),
        }
    }
}

impl BatchOptions {
    /// Options handed to the per-need candidate scan
    pub fn per_need(&self) -> MatchOptions {
        MatchOptions {
            max_distance_km: self.max_distance_km,
            min_score: self.min_score,
            max_results: self.max_matches_per_need,
        }
    }
}

fn default_batch_min_score() -> u32 { 30 }
fn default_max_matches_per_need() -> usize { 3 }

/// Recommendation lookup for one resource keyword
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    pub resource_type: String,
    #[validate(nested)]
    #[serde(default)]
    pub location: Option<Coordinates>,
}
