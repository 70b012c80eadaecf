use thiserror::Error;
use validator::Validate;

use crate::config::Settings;
use crate::core::Matcher;
use crate::error::MatchError;
use crate::models::{
    BatchOptions, ErrorResponse, MatchOptions, MatchResult, MatchesResponse, Recommendation,
    RecommendRequest,
};
use crate::services::{Dataset, DatasetError};

/// Errors surfaced by the `aid-match` commands
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CommandError {
    pub fn to_response(&self) -> ErrorResponse {
        let error = match self {
            CommandError::Dataset(DatasetError::NotFound(_)) => "not_found",
            CommandError::Dataset(_) => "invalid_dataset",
            CommandError::Match(MatchError::InvalidInput(_)) | CommandError::Validation(_) => {
                "invalid_input"
            }
            CommandError::Match(MatchError::CandidateScoring { .. }) => "scoring_failed",
            CommandError::Serialization(_) => "serialization_failed",
        };
        ErrorResponse {
            error: error.to_string(),
            message: self.to_string(),
        }
    }
}

/// State shared by all commands
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Dataset,
    pub matcher: Matcher,
    pub settings: Settings,
}

impl AppState {
    pub fn new(dataset: Dataset, settings: Settings) -> Self {
        Self {
            matcher: settings.matcher(),
            dataset,
            settings,
        }
    }
}

/// Score one offer against one need
pub fn score(state: &AppState, offer_id: &str, need_id: &str) -> Result<MatchResult, CommandError> {
    let offer = state.dataset.offer(offer_id);
    let need = state.dataset.need(need_id);

    if offer.is_none() {
        tracing::info!("Offer {} not in dataset", offer_id);
    }
    if need.is_none() {
        tracing::info!("Need {} not in dataset", need_id);
    }

    Ok(state.matcher.score(offer, need)?)
}

/// Best offers for one need
pub fn matches_for_need(
    state: &AppState,
    need_id: &str,
    options: &MatchOptions,
) -> Result<MatchesResponse, CommandError> {
    let need = state.dataset.require_need(need_id)?;
    let offers = &state.dataset.offers;

    tracing::info!("Finding offers for need: {}, limit: {}", need_id, options.max_results);

    let matches = state.matcher.find_matches_for_need(need, offers, options);

    tracing::info!(
        "Returning {} matches for need {} (from {} offers)",
        matches.len(),
        need_id,
        offers.len()
    );

    Ok(MatchesResponse {
        matches,
        total_candidates: offers.len(),
    })
}

/// Best needs for one offer
pub fn matches_for_offer(
    state: &AppState,
    offer_id: &str,
    options: &MatchOptions,
) -> Result<MatchesResponse, CommandError> {
    let offer = state.dataset.require_offer(offer_id)?;
    let needs = &state.dataset.needs;

    tracing::info!("Finding needs for offer: {}, limit: {}", offer_id, options.max_results);

    let matches = state.matcher.find_matches_for_offer(offer, needs, options);

    tracing::info!(
        "Returning {} matches for offer {} (from {} needs)",
        matches.len(),
        offer_id,
        needs.len()
    );

    Ok(MatchesResponse {
        matches,
        total_candidates: needs.len(),
    })
}

/// Pair every open need with available offers
///
/// `total_candidates` is the size of the offer pool each need was scanned against.
pub fn auto_match(state: &AppState, options: &BatchOptions) -> MatchesResponse {
    let Dataset { offers, needs } = &state.dataset;
    let matches = state.matcher.auto_match_all(needs, offers, options);

    tracing::info!(
        "Auto-matched {} pairs across {} needs and {} offers",
        matches.len(),
        needs.len(),
        offers.len()
    );

    MatchesResponse {
        matches,
        total_candidates: offers.len(),
    }
}

/// Recommendation summary for one resource keyword
pub fn recommend(state: &AppState, request: &RecommendRequest) -> Result<Recommendation, CommandError> {
    if let Err(errors) = request.validate() {
        tracing::info!("Validation failed for recommend request: {:?}", errors);
        return Err(errors.into());
    }

    let recommendation = state.matcher.recommend(
        &request.resource_type,
        &state.dataset.offers,
        &state.dataset.needs,
        request.location,
    )?;

    tracing::info!(
        "Recommendation for '{}': {} matches ({} high confidence)",
        recommendation.resource_type,
        recommendation.total_matches,
        recommendation.high_confidence_matches
    );

    Ok(recommendation)
}
