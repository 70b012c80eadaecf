use serde::{Deserialize, Serialize};
use crate::models::domain::{Coordinates, MatchResult};

/// Summary returned for a resource-keyword recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub resource_type: String,
    pub total_offers: usize,
    pub total_needs: usize,
    pub total_matches: usize,
    pub high_confidence_matches: usize,
    pub urgent_needs: usize,
    pub matches: Vec<MatchResult>,
    pub location: Option<Coordinates>,
}

/// Ranked match list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
